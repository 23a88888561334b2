//! Key-value storage for swat.
//!
//! Storage has two layers:
//!
//! - **[`KvBackend`]**: raw string keys to raw string values. Backends are
//!   pluggable: [`MemoryBackend`] for tests and transient kernels,
//!   [`FileBackend`] for a single JSON file on disk.
//! - **[`StorageAdapter`]**: namespaces every key under a fixed prefix and
//!   serializes structured values to and from JSON text.
//!
//! # Corrupt data
//!
//! A stored value that fails to deserialize is treated as absent by
//! [`StorageAdapter::get`]. Callers that need to tell the two apart use
//! [`StorageAdapter::load`], which reports [`Loaded::Corrupt`].

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Default namespace prefix for every key written through an adapter.
pub const DEFAULT_PREFIX: &str = "swat:";

/// Errors from storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backend refused a write because it is full.
    #[error("storage quota exceeded: {needed} bytes needed, {limit} allowed")]
    QuotaExceeded { needed: usize, limit: usize },

    /// The backing file could not be read or written.
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized for storage.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The backend's own data could not be parsed.
    #[error("storage data is corrupt: {reason}")]
    Corrupt { reason: String },

    /// Any other backend failure.
    #[error("storage error: {0}")]
    Backend(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Raw key-value backend.
///
/// Keys and values are opaque strings; namespacing and serialization are
/// the adapter's job.
#[async_trait]
pub trait KvBackend: Send + Sync {
    /// Fetch the raw value for a key.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store a raw value, replacing any previous one.
    async fn set(&self, key: &str, value: String) -> StorageResult<()>;

    /// Remove a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> StorageResult<()>;

    /// All keys currently stored, in no particular order.
    async fn keys(&self) -> StorageResult<Vec<String>>;
}

/// Outcome of [`StorageAdapter::load`].
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<T> {
    /// The key held a well-formed value.
    Present(T),
    /// Nothing is stored under the key.
    Absent,
    /// Something is stored but it does not deserialize.
    Corrupt { reason: String },
}

impl<T> Loaded<T> {
    /// Collapse to an `Option`, treating corruption as absence.
    pub fn into_option(self) -> Option<T> {
        match self {
            Loaded::Present(value) => Some(value),
            Loaded::Absent | Loaded::Corrupt { .. } => None,
        }
    }

    /// True if the stored value failed to deserialize.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Loaded::Corrupt { .. })
    }
}

/// Namespaced, JSON-serializing view over a [`KvBackend`].
#[derive(Clone)]
pub struct StorageAdapter {
    backend: Arc<dyn KvBackend>,
    prefix: String,
}

impl StorageAdapter {
    /// Create an adapter using the default `swat:` prefix.
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self::with_prefix(backend, DEFAULT_PREFIX)
    }

    /// Create an adapter with a custom namespace prefix.
    pub fn with_prefix(backend: Arc<dyn KvBackend>, prefix: impl Into<String>) -> Self {
        Self {
            backend,
            prefix: prefix.into(),
        }
    }

    /// Transient adapter over a fresh [`MemoryBackend`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// The namespace prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Load a value, distinguishing absence from corruption.
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Loaded<T>> {
        let raw = match self.backend.get(&self.full_key(key)).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(Loaded::Absent),
            Err(StorageError::Corrupt { reason }) => return Ok(Loaded::Corrupt { reason }),
            Err(e) => return Err(e),
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Loaded::Present(value)),
            Err(e) => {
                tracing::warn!(key, error = %e, "stored value is corrupt");
                Ok(Loaded::Corrupt {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Fetch a value. Corrupt data reads as `None`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        Ok(self.load(key).await?.into_option())
    }

    /// Serialize and store a value.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        tracing::debug!(key, bytes = raw.len(), "storage set");
        self.backend.set(&self.full_key(key), raw).await
    }

    /// Remove a value. Absent keys are fine.
    pub async fn delete(&self, key: &str) -> StorageResult<()> {
        self.backend.remove(&self.full_key(key)).await
    }

    /// Keys in this namespace starting with `prefix`, with the namespace
    /// stripped. The returned keys still begin with `prefix`.
    pub async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let wanted = self.full_key(prefix);
        let all = match self.backend.keys().await {
            Ok(keys) => keys,
            Err(StorageError::Corrupt { reason }) => {
                tracing::warn!(%reason, "listing corrupt storage as empty");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        let mut keys: Vec<String> = all
            .into_iter()
            .filter(|k| k.starts_with(&wanted))
            .map(|k| k[self.prefix.len()..].to_string())
            .collect();
        keys.sort();
        Ok(keys)
    }
}

impl std::fmt::Debug for StorageAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageAdapter")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
