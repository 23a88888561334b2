//! The Kernel — the heart of swat.
//!
//! The Kernel owns and coordinates all core components:
//! - Storage adapter (memory or a JSON file on disk)
//! - VFS (files, working directory, history)
//! - Tool registry (builtins plus anything registered at runtime)
//! - Pipeline runner
//! - VFS event channel
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                          Kernel                            │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐  │
//! │  │ToolRegistry  │  │PipelineRunner│  │  Vfs             │  │
//! │  │  (builtins,  │──│ (parse, pipe,│──│  (files, cwd,    │  │
//! │  │   runtime)   │  │  redirect)   │  │   history)       │  │
//! │  └──────────────┘  └──────────────┘  └────────┬─────────┘  │
//! │                                      ┌────────┴─────────┐  │
//! │  ┌──────────────┐                    │ StorageAdapter   │  │
//! │  │ VfsEvent     │◀── after persist ──│ (memory / file)  │  │
//! │  │ broadcast    │                    └──────────────────┘  │
//! │  └──────────────┘                                          │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Construction is two-phase: [`Kernel::new`] wires everything without
//! touching storage, [`Kernel::initialize`] loads the persisted state.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{RwLock, broadcast};

use crate::documents::DocumentStore;
use crate::paths;
use crate::result::ExecResult;
use crate::scheduler::PipelineRunner;
use crate::storage::{DEFAULT_PREFIX, FileBackend, KvBackend, MemoryBackend, StorageAdapter};
use crate::tools::{Tool, ToolRegistry, ToolSchema, register_builtins};
use crate::vfs::{
    DEFAULT_HISTORY_LIMIT, DEFAULT_STATE_KEY, LoadOutcome, Vfs, VfsEvent, VfsOptions, events,
};

/// Configuration for kernel initialization.
#[derive(Debug, Clone)]
pub struct KernelConfig {
    /// Name of this kernel (used for state file naming).
    pub name: String,
    /// Whether to persist state to a file.
    pub persist: bool,
    /// Directory for the state file. `None` uses [`paths::kernels_dir`].
    pub data_dir: Option<PathBuf>,
    /// Namespace prefix for storage keys.
    pub storage_prefix: String,
    /// Storage key holding the VFS state.
    pub state_key: String,
    /// Maximum history entries kept.
    pub history_limit: usize,
    /// Whether executed lines are recorded in history.
    pub record_history: bool,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            persist: true,
            data_dir: None,
            storage_prefix: DEFAULT_PREFIX.to_string(),
            state_key: DEFAULT_STATE_KEY.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            record_history: true,
        }
    }
}

impl KernelConfig {
    /// Create a transient (non-persistent) kernel config.
    pub fn transient() -> Self {
        Self {
            name: "transient".to_string(),
            persist: false,
            ..Self::default()
        }
    }

    /// Create a persistent kernel config with the given name.
    pub fn persistent(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Store state under `dir` instead of the XDG data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Path of the JSON state file used when `persist` is set.
    pub fn state_file(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => dir.join(format!("{}.json", self.name)),
            None => paths::kernel_state_file(&self.name),
        }
    }

    fn vfs_options(&self) -> VfsOptions {
        VfsOptions {
            state_key: self.state_key.clone(),
            history_limit: self.history_limit,
        }
    }
}

/// The Kernel — executes swat command lines.
///
/// This is the primary interface for running commands. It owns the
/// runtime state: tools, VFS, storage and the change channel.
pub struct Kernel {
    /// Kernel name (for state file).
    name: String,
    /// Whether `execute` records history.
    record_history: bool,
    /// Tool registry, shared with the runner.
    tools: Arc<RwLock<ToolRegistry>>,
    /// Virtual filesystem.
    vfs: Arc<Vfs>,
    /// Pipeline runner.
    runner: PipelineRunner,
    /// VFS change notifications.
    events: broadcast::Sender<VfsEvent>,
}

impl Kernel {
    /// Create a new kernel with the given configuration.
    ///
    /// No storage is read until [`initialize`](Self::initialize).
    pub fn new(config: KernelConfig) -> Result<Self> {
        let backend: Arc<dyn KvBackend> = if config.persist {
            let file = config.state_file();
            tracing::debug!(path = %file.display(), "using file storage");
            Arc::new(FileBackend::new(file))
        } else {
            Arc::new(MemoryBackend::new())
        };
        Self::with_backend(config, backend)
    }

    /// Create a kernel over an explicit storage backend.
    pub fn with_backend(config: KernelConfig, backend: Arc<dyn KvBackend>) -> Result<Self> {
        if config.name.is_empty() || config.name.contains(['/', '\\']) {
            anyhow::bail!("invalid kernel name: {:?}", config.name);
        }

        let storage = StorageAdapter::with_prefix(backend, config.storage_prefix.clone());
        let events = events::channel();
        let vfs = Arc::new(Vfs::new(storage, config.vfs_options(), Some(events.clone())));

        // Set up tools
        let mut tools = ToolRegistry::new();
        register_builtins(&mut tools);
        let tools = Arc::new(RwLock::new(tools));

        let runner = PipelineRunner::new(tools.clone(), vfs.clone());

        Ok(Self {
            name: config.name,
            record_history: config.record_history,
            tools,
            vfs,
            runner,
            events,
        })
    }

    /// Create a transient kernel (no persistence).
    pub fn transient() -> Result<Self> {
        Self::new(KernelConfig::transient())
    }

    /// Load persisted state. Must complete before [`execute`](Self::execute).
    pub async fn initialize(&self) -> Result<LoadOutcome> {
        let outcome = self
            .vfs
            .initialize()
            .await
            .with_context(|| format!("failed to initialize kernel '{}'", self.name))?;
        if let LoadOutcome::Degraded { reason } = &outcome {
            tracing::warn!(kernel = %self.name, %reason, "stored state was corrupt; starting empty");
        }
        Ok(outcome)
    }

    /// Get the kernel name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute one command line.
    ///
    /// Never fails: every problem is reported through the result. A blank
    /// line runs as a command with an empty name and exits 127. Non-blank
    /// lines are recorded in history first; a failure to record is logged.
    pub async fn execute(&self, line: &str) -> ExecResult {
        let line = line.trim();
        if self.record_history && !line.is_empty() {
            if let Err(e) = self.vfs.record_history(line).await {
                tracing::warn!(error = %e, "failed to record history");
            }
        }
        self.runner.run_line(line).await
    }

    // --- Tools ---

    /// Register a tool under its own name, replacing any existing one.
    pub async fn register_tool(&self, tool: impl Tool + 'static) {
        self.tools.write().await.register(tool);
    }

    /// Register a tool under an explicit name.
    pub async fn register_tool_as(&self, name: &str, tool: Arc<dyn Tool>) {
        self.tools.write().await.register_as(name, tool);
    }

    /// Get available tool schemas.
    pub async fn tool_schemas(&self) -> Vec<ToolSchema> {
        self.tools.read().await.schemas()
    }

    /// Tool names in registration order.
    pub async fn tool_names(&self) -> Vec<String> {
        self.tools
            .read()
            .await
            .names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    // --- VFS ---

    /// Get the VFS.
    pub fn vfs(&self) -> Arc<Vfs> {
        self.vfs.clone()
    }

    /// Document access over this kernel's VFS.
    pub fn documents(&self) -> DocumentStore {
        DocumentStore::new(self.vfs.clone())
    }

    /// Subscribe to VFS change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<VfsEvent> {
        self.events.subscribe()
    }

    /// Get current working directory.
    pub async fn cwd(&self) -> Result<String> {
        Ok(self.vfs.cwd().await?)
    }

    /// Recorded command history, oldest first.
    pub async fn history(&self) -> Result<Vec<String>> {
        Ok(self.vfs.history().await?)
    }

    // --- State ---

    /// Reset the VFS to an empty tree at `/` and persist it.
    pub async fn reset(&self) -> Result<()> {
        self.vfs
            .import(Default::default())
            .await
            .context("failed to reset kernel state")
    }
}

impl std::fmt::Debug for Kernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kernel")
            .field("name", &self.name)
            .field("record_history", &self.record_history)
            .finish_non_exhaustive()
    }
}
