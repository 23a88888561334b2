//! The storage-backed virtual filesystem.

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, broadcast};

use super::events::VfsEvent;
use super::path::{self, NormalizedPath};
use super::state::{DEFAULT_HISTORY_LIMIT, FileKind, FileRecord, VfsState};
use crate::storage::{Loaded, StorageAdapter, StorageError};

/// Default storage key holding the serialized tree.
pub const DEFAULT_STATE_KEY: &str = "vfs_state";

/// Errors from VFS operations.
#[derive(Debug, thiserror::Error)]
pub enum VfsError {
    /// No text file exists at the path.
    #[error("not found: {0}")]
    NotFound(String),

    /// An operation ran before [`Vfs::initialize`] completed.
    #[error("filesystem not ready: initialize() has not completed")]
    NotReady,

    /// The storage backend rejected a read or write.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for VFS operations.
pub type VfsResult<T> = Result<T, VfsError>;

/// What [`Vfs::initialize`] found in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored yet; started empty.
    Fresh,
    /// Loaded a previously persisted tree.
    Restored { files: usize },
    /// Stored state was corrupt; started empty.
    Degraded { reason: String },
}

/// Metadata returned by [`Vfs::stat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    /// Size in bytes.
    pub size: u64,
    pub modified_at: DateTime<Utc>,
    pub kind: FileKind,
}

/// Tunables for a [`Vfs`].
#[derive(Debug, Clone)]
pub struct VfsOptions {
    /// Storage key the whole state is persisted under.
    pub state_key: String,
    /// Maximum history entries kept.
    pub history_limit: usize,
}

impl Default for VfsOptions {
    fn default() -> Self {
        Self {
            state_key: DEFAULT_STATE_KEY.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// Path-addressed tree of text files persisted through a [`StorageAdapter`].
///
/// Construction is two-phase: [`Vfs::new`] does no I/O, and every operation
/// fails with [`VfsError::NotReady`] until [`Vfs::initialize`] has loaded
/// the stored state.
///
/// Every mutation persists the entire state before returning. The state
/// lock is held across the mutation and the write, so operations on one
/// `Vfs` apply in call order. Nothing coordinates separate `Vfs` values
/// sharing a backend: the last full-state write wins.
///
/// A failed persist leaves the in-memory change in place and returns the
/// storage error.
pub struct Vfs {
    storage: StorageAdapter,
    options: VfsOptions,
    state: Mutex<Option<VfsState>>,
    events: Option<broadcast::Sender<VfsEvent>>,
}

impl Vfs {
    /// Create an uninitialized filesystem.
    pub fn new(
        storage: StorageAdapter,
        options: VfsOptions,
        events: Option<broadcast::Sender<VfsEvent>>,
    ) -> Self {
        Self {
            storage,
            options,
            state: Mutex::new(None),
            events,
        }
    }

    /// Transient, uninitialized filesystem over in-memory storage.
    pub fn in_memory() -> Self {
        Self::new(StorageAdapter::in_memory(), VfsOptions::default(), None)
    }

    /// Load state from storage. Calling it again reloads.
    pub async fn initialize(&self) -> VfsResult<LoadOutcome> {
        let mut guard = self.state.lock().await;
        let (state, outcome) = match self.storage.load::<VfsState>(&self.options.state_key).await? {
            Loaded::Present(state) => {
                let files = state.files.len();
                (state, LoadOutcome::Restored { files })
            }
            Loaded::Absent => (VfsState::default(), LoadOutcome::Fresh),
            Loaded::Corrupt { reason } => {
                tracing::warn!(key = %self.options.state_key, %reason, "vfs state corrupt, starting empty");
                (VfsState::default(), LoadOutcome::Degraded { reason })
            }
        };
        tracing::debug!(?outcome, "vfs initialized");
        *guard = Some(state);
        Ok(outcome)
    }

    /// True once [`initialize`](Self::initialize) has completed.
    pub async fn is_ready(&self) -> bool {
        self.state.lock().await.is_some()
    }

    async fn persist(&self, state: &VfsState) -> VfsResult<()> {
        self.storage.set(&self.options.state_key, state).await?;
        Ok(())
    }

    fn emit(&self, event: VfsEvent) {
        if let Some(tx) = &self.events {
            // No receivers is fine.
            let _ = tx.send(event);
        }
    }

    fn resolve(state: &VfsState, input: &str) -> String {
        let normalized = path::normalize(&state.cwd, input);
        if normalized.clamped {
            tracing::debug!(input, path = %normalized, "path climbed above root");
        }
        normalized.path
    }

    /// Normalize a path against the current working directory.
    pub async fn normalize(&self, input: &str) -> VfsResult<NormalizedPath> {
        let guard = self.state.lock().await;
        let state = guard.as_ref().ok_or(VfsError::NotReady)?;
        Ok(path::normalize(&state.cwd, input))
    }

    /// Read a text file.
    pub async fn read(&self, path: &str) -> VfsResult<String> {
        let guard = self.state.lock().await;
        let state = guard.as_ref().ok_or(VfsError::NotReady)?;
        let path = Self::resolve(state, path);
        match state.files.get(&path) {
            Some(record) if record.kind == FileKind::Text => Ok(record.content.clone()),
            _ => Err(VfsError::NotFound(path)),
        }
    }

    /// Create or replace a text file.
    pub async fn write(&self, path: &str, content: &str) -> VfsResult<()> {
        let mut guard = self.state.lock().await;
        let state = guard.as_mut().ok_or(VfsError::NotReady)?;
        let path = Self::resolve(state, path);
        state.files.insert(path.clone(), FileRecord::text(content));
        self.persist(state).await?;
        tracing::debug!(%path, bytes = content.len(), "vfs write");
        self.emit(VfsEvent::Written { path });
        Ok(())
    }

    /// Remove a file. Removing a path that does not exist succeeds.
    pub async fn delete(&self, path: &str) -> VfsResult<()> {
        let mut guard = self.state.lock().await;
        let state = guard.as_mut().ok_or(VfsError::NotReady)?;
        let path = Self::resolve(state, path);
        let existed = state.files.remove(&path).is_some();
        self.persist(state).await?;
        tracing::debug!(%path, existed, "vfs delete");
        self.emit(VfsEvent::Deleted { path });
        Ok(())
    }

    /// Names of files directly inside `dir`, sorted.
    ///
    /// Directories are implicit, so files in nested directories are not
    /// listed and no directory names appear.
    pub async fn list(&self, dir: &str) -> VfsResult<Vec<String>> {
        let guard = self.state.lock().await;
        let state = guard.as_ref().ok_or(VfsError::NotReady)?;
        let dir = Self::resolve(state, dir);
        Ok(state
            .files
            .keys()
            .filter_map(|p| path::child_name(&dir, p))
            .map(str::to_string)
            .collect())
    }

    /// Size, modification time and kind of a file.
    pub async fn stat(&self, path: &str) -> VfsResult<FileStat> {
        let guard = self.state.lock().await;
        let state = guard.as_ref().ok_or(VfsError::NotReady)?;
        let path = Self::resolve(state, path);
        let record = state.files.get(&path).ok_or(VfsError::NotFound(path))?;
        Ok(FileStat {
            size: record.size(),
            modified_at: record.modified_at,
            kind: record.kind,
        })
    }

    /// True if a file (of any kind) exists at the path.
    pub async fn exists(&self, path: &str) -> VfsResult<bool> {
        let guard = self.state.lock().await;
        let state = guard.as_ref().ok_or(VfsError::NotReady)?;
        Ok(state.files.contains_key(&Self::resolve(state, path)))
    }

    /// The current working directory.
    pub async fn cwd(&self) -> VfsResult<String> {
        let guard = self.state.lock().await;
        let state = guard.as_ref().ok_or(VfsError::NotReady)?;
        Ok(state.cwd.clone())
    }

    /// Change the working directory and persist it. Returns the new cwd.
    ///
    /// Directories are implicit, so any normalized path is accepted.
    pub async fn change_directory(&self, path: &str) -> VfsResult<String> {
        let mut guard = self.state.lock().await;
        let state = guard.as_mut().ok_or(VfsError::NotReady)?;
        state.cwd = Self::resolve(state, path);
        self.persist(state).await?;
        let cwd = state.cwd.clone();
        self.emit(VfsEvent::DirectoryChanged { cwd: cwd.clone() });
        Ok(cwd)
    }

    /// Append a command to the bounded history log and persist.
    pub async fn record_history(&self, command: &str) -> VfsResult<()> {
        let mut guard = self.state.lock().await;
        let state = guard.as_mut().ok_or(VfsError::NotReady)?;
        state.push_history(command, self.options.history_limit);
        self.persist(state).await
    }

    /// History entries, oldest first.
    pub async fn history(&self) -> VfsResult<Vec<String>> {
        let guard = self.state.lock().await;
        let state = guard.as_ref().ok_or(VfsError::NotReady)?;
        Ok(state.history.iter().cloned().collect())
    }

    /// A copy of the full state.
    pub async fn snapshot(&self) -> VfsResult<VfsState> {
        let guard = self.state.lock().await;
        guard.clone().ok_or(VfsError::NotReady)
    }

    /// Replace the full state and persist it.
    ///
    /// History from the imported state is trimmed to the configured limit.
    pub async fn import(&self, mut incoming: VfsState) -> VfsResult<()> {
        let mut guard = self.state.lock().await;
        if guard.is_none() {
            return Err(VfsError::NotReady);
        }
        while incoming.history.len() > self.options.history_limit {
            incoming.history.pop_front();
        }
        incoming.cwd = path::normalize("/", &incoming.cwd).path;
        self.persist(&incoming).await?;
        *guard = Some(incoming);
        self.emit(VfsEvent::Imported);
        Ok(())
    }
}

impl std::fmt::Debug for Vfs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vfs")
            .field("storage", &self.storage)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KvBackend, MemoryBackend};
    use std::sync::Arc;

    async fn ready() -> Vfs {
        let vfs = Vfs::in_memory();
        vfs.initialize().await.unwrap();
        vfs
    }

    #[tokio::test]
    async fn test_write_and_read() {
        let vfs = ready().await;
        vfs.write("/test.txt", "hello world").await.unwrap();
        assert_eq!(vfs.read("/test.txt").await.unwrap(), "hello world");
    }

    #[tokio::test]
    async fn test_read_not_found() {
        let vfs = ready().await;
        let err = vfs.read("/nonexistent.txt").await.unwrap_err();
        assert!(matches!(err, VfsError::NotFound(p) if p == "/nonexistent.txt"));
    }

    #[tokio::test]
    async fn test_operations_before_initialize_are_not_ready() {
        let vfs = Vfs::in_memory();
        assert!(!vfs.is_ready().await);
        assert!(matches!(vfs.read("/a").await, Err(VfsError::NotReady)));
        assert!(matches!(vfs.write("/a", "x").await, Err(VfsError::NotReady)));
        assert!(matches!(vfs.list("/").await, Err(VfsError::NotReady)));
        assert!(matches!(vfs.cwd().await, Err(VfsError::NotReady)));
    }

    #[tokio::test]
    async fn test_delete_missing_succeeds() {
        let vfs = ready().await;
        vfs.delete("/ghost.txt").await.unwrap();
        assert!(matches!(vfs.read("/ghost.txt").await, Err(VfsError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_immediate_children_only() {
        let vfs = ready().await;
        vfs.write("/d/a.txt", "a").await.unwrap();
        vfs.write("/d/sub/b.txt", "b").await.unwrap();
        assert_eq!(vfs.list("/d").await.unwrap(), vec!["a.txt"]);
        assert!(vfs.list("/").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_relative_paths_use_cwd() {
        let vfs = ready().await;
        assert_eq!(vfs.change_directory("/docs").await.unwrap(), "/docs");
        vfs.write("note.txt", "n").await.unwrap();
        assert_eq!(vfs.read("/docs/note.txt").await.unwrap(), "n");
        assert_eq!(vfs.list(".").await.unwrap(), vec!["note.txt"]);
    }

    #[tokio::test]
    async fn test_stat() {
        let vfs = ready().await;
        vfs.write("/s.txt", "héllo").await.unwrap();
        let stat = vfs.stat("/s.txt").await.unwrap();
        assert_eq!(stat.size, 6);
        assert_eq!(stat.kind, FileKind::Text);
        assert!(matches!(vfs.stat("/none").await, Err(VfsError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_state_persists_across_instances() {
        let backend: Arc<dyn KvBackend> = Arc::new(MemoryBackend::new());
        let first = Vfs::new(StorageAdapter::new(backend.clone()), VfsOptions::default(), None);
        first.initialize().await.unwrap();
        first.write("/keep.txt", "kept").await.unwrap();
        first.change_directory("/work").await.unwrap();
        first.record_history("echo hi").await.unwrap();

        let second = Vfs::new(StorageAdapter::new(backend), VfsOptions::default(), None);
        assert_eq!(
            second.initialize().await.unwrap(),
            LoadOutcome::Restored { files: 1 }
        );
        assert_eq!(second.read("/keep.txt").await.unwrap(), "kept");
        assert_eq!(second.cwd().await.unwrap(), "/work");
        assert_eq!(second.history().await.unwrap(), vec!["echo hi"]);
    }

    #[tokio::test]
    async fn test_corrupt_state_is_degraded() {
        let backend = Arc::new(MemoryBackend::new());
        backend.set("swat:vfs_state", "][".into()).await.unwrap();
        let vfs = Vfs::new(StorageAdapter::new(backend), VfsOptions::default(), None);

        let outcome = vfs.initialize().await.unwrap();
        assert!(matches!(outcome, LoadOutcome::Degraded { .. }));
        assert!(vfs.list("/").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_surfaces_storage_failure() {
        let storage = StorageAdapter::new(Arc::new(MemoryBackend::with_quota(64)));
        let vfs = Vfs::new(storage, VfsOptions::default(), None);
        vfs.initialize().await.unwrap();

        let err = vfs.write("/big.txt", &"x".repeat(256)).await.unwrap_err();
        assert!(matches!(err, VfsError::Storage(StorageError::QuotaExceeded { .. })));
    }

    #[tokio::test]
    async fn test_history_is_bounded() {
        let options = VfsOptions {
            history_limit: 3,
            ..VfsOptions::default()
        };
        let vfs = Vfs::new(StorageAdapter::in_memory(), options, None);
        vfs.initialize().await.unwrap();
        for cmd in ["a", "b", "c", "d"] {
            vfs.record_history(cmd).await.unwrap();
        }
        assert_eq!(vfs.history().await.unwrap(), vec!["b", "c", "d"]);
    }

    #[tokio::test]
    async fn test_events_follow_mutations() {
        let tx = crate::vfs::events::channel();
        let mut rx = tx.subscribe();
        let vfs = Vfs::new(StorageAdapter::in_memory(), VfsOptions::default(), Some(tx));
        vfs.initialize().await.unwrap();

        vfs.write("a.txt", "1").await.unwrap();
        vfs.delete("/a.txt").await.unwrap();
        vfs.change_directory("/x").await.unwrap();

        assert_eq!(rx.recv().await.unwrap(), VfsEvent::Written { path: "/a.txt".into() });
        assert_eq!(rx.recv().await.unwrap(), VfsEvent::Deleted { path: "/a.txt".into() });
        assert_eq!(rx.recv().await.unwrap(), VfsEvent::DirectoryChanged { cwd: "/x".into() });
    }

    #[tokio::test]
    async fn test_snapshot_and_import() {
        let source = ready().await;
        source.write("/a.txt", "a").await.unwrap();
        let snapshot = source.snapshot().await.unwrap();

        let target = ready().await;
        target.write("/old.txt", "old").await.unwrap();
        target.import(snapshot).await.unwrap();

        assert_eq!(target.read("/a.txt").await.unwrap(), "a");
        assert!(!target.exists("/old.txt").await.unwrap());
    }
}
