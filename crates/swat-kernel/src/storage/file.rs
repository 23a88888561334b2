//! Single-file key-value backend.
//!
//! Every key lives in one JSON object on disk. Each operation reads the
//! file, applies its change, and rewrites it through a temp file + rename,
//! so a crash mid-write leaves the previous contents intact.
//!
//! A file that does not parse is reported as [`StorageError::Corrupt`] on
//! read. The first write afterwards moves it to `<file>.corrupt` and starts
//! a fresh map.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use super::{KvBackend, StorageError, StorageResult};

/// Key-value backend persisted to a JSON file.
///
/// A missing file is an empty store.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileBackend {
    /// Create a backend stored at `path`. Nothing is touched until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unparsable file is moved before the next write.
    pub fn quarantine_path(&self) -> PathBuf {
        let mut path = self.path.clone().into_os_string();
        path.push(".corrupt");
        PathBuf::from(path)
    }

    async fn load(&self) -> StorageResult<BTreeMap<String, String>> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StorageError::Io(e)),
        };
        serde_json::from_str(&raw).map_err(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "storage file is corrupt");
            StorageError::Corrupt {
                reason: format!("{}: {e}", self.path.display()),
            }
        })
    }

    /// Load for a read-modify-write. A corrupt file is moved aside first.
    async fn load_for_write(&self) -> StorageResult<BTreeMap<String, String>> {
        match self.load().await {
            Err(StorageError::Corrupt { .. }) => {
                let aside = self.quarantine_path();
                fs::rename(&self.path, &aside).await?;
                tracing::warn!(path = %aside.display(), "moved corrupt storage file aside");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    async fn store(&self, map: &BTreeMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let raw = serde_json::to_string_pretty(map)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, raw).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KvBackend for FileBackend {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> StorageResult<()> {
        let _guard = self.lock.lock().await;
        let mut map = self.load_for_write().await?;
        map.insert(key.to_string(), value);
        self.store(&map).await
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let _guard = self.lock.lock().await;
        let mut map = self.load_for_write().await?;
        if map.remove(key).is_some() {
            self.store(&map).await?;
        }
        Ok(())
    }

    async fn keys(&self) -> StorageResult<Vec<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.into_keys().collect())
    }
}
