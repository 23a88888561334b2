//! In-memory key-value backend.
//!
//! Used for transient kernels and testing. All data is lost when dropped.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{KvBackend, StorageError, StorageResult};

/// In-memory backend with an optional byte quota.
///
/// The quota counts key and value bytes across all entries, the way browser
/// storage budgets do. A `set` that would go over it fails with
/// [`StorageError::QuotaExceeded`] and leaves the previous value in place.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryBackend {
    /// Create an unbounded backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that holds at most `bytes` of keys plus values.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota: Some(bytes),
        }
    }

    /// Bytes currently used.
    pub async fn used_bytes(&self) -> usize {
        let entries = self.entries.read().await;
        entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

#[async_trait]
impl KvBackend for MemoryBackend {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> StorageResult<()> {
        let mut entries = self.entries.write().await;

        if let Some(limit) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }

        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.entries.read().await.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let backend = MemoryBackend::new();
        backend.set("a", "1".into()).await.unwrap();
        assert_eq!(backend.get("a").await.unwrap().as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_overwrite() {
        let backend = MemoryBackend::new();
        backend.set("a", "1".into()).await.unwrap();
        backend.set("a", "2".into()).await.unwrap();
        assert_eq!(backend.get("a").await.unwrap().as_deref(), Some("2"));
        assert_eq!(backend.keys().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_quota_rejects_and_keeps_old_value() {
        let backend = MemoryBackend::with_quota(10);
        backend.set("k", "small".into()).await.unwrap();

        let err = backend.set("k", "much too large".into()).await.unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { limit: 10, .. }));
        assert_eq!(backend.get("k").await.unwrap().as_deref(), Some("small"));
    }

    #[tokio::test]
    async fn test_quota_counts_replacement_not_sum() {
        let backend = MemoryBackend::with_quota(8);
        backend.set("k", "1234567".into()).await.unwrap();
        // Replacing a value only needs room for the new one.
        backend.set("k", "7654321".into()).await.unwrap();
        assert_eq!(backend.used_bytes().await, 8);
    }

    #[tokio::test]
    async fn test_remove_missing_is_ok() {
        let backend = MemoryBackend::new();
        backend.remove("ghost").await.unwrap();
        assert!(backend.get("ghost").await.unwrap().is_none());
    }
}
