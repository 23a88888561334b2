//! Documents: content files with JSON metadata sidecars.
//!
//! A document at `/docs/report.html` keeps its metadata next to it in
//! `/docs/report.json`:
//!
//! ```text
//! { "path": "/docs/report.html", "title": "Report", "format": "html",
//!   "mtime": 1718000000000, "size": 42 }
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::vfs::{Vfs, VfsResult, file_name, path_join};

/// Extension assumed for a document whose sidecar lacks a `path`.
pub const DEFAULT_EXTENSION: &str = "html";

/// Metadata stored in a document's sidecar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Path of the content file. Older sidecars may omit it.
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub format: String,
    #[serde(rename = "mtime", with = "chrono::serde::ts_milliseconds")]
    pub modified_at: DateTime<Utc>,
    /// Content length in bytes.
    #[serde(default)]
    pub size: u64,
}

/// An opened document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub content: String,
    pub meta: DocumentMeta,
}

/// Sidecar path for a content path: the extension swapped for `.json`.
///
/// JSON content keeps its name and gains a second `.json`, so
/// `data.json` is described by `data.json.json`.
pub fn sidecar_path(path: &str) -> String {
    let name = file_name(path);
    if name.ends_with(".json") {
        return format!("{path}.json");
    }
    match name.rfind('.') {
        Some(dot) if dot > 0 => format!("{}.json", &path[..path.len() - (name.len() - dot)]),
        _ => format!("{path}.json"),
    }
}

/// Typed access to documents stored in a [`Vfs`].
#[derive(Clone)]
pub struct DocumentStore {
    vfs: Arc<Vfs>,
}

impl DocumentStore {
    pub fn new(vfs: Arc<Vfs>) -> Self {
        Self { vfs }
    }

    /// Write the content and its sidecar. Returns the stored metadata.
    pub async fn save(
        &self,
        path: &str,
        content: &str,
        title: &str,
        format: &str,
    ) -> anyhow::Result<DocumentMeta> {
        let path = self.vfs.normalize(path).await?.path;
        self.vfs.write(&path, content).await?;

        let meta = DocumentMeta {
            path: path.clone(),
            title: title.to_string(),
            format: format.to_string(),
            modified_at: Utc::now(),
            size: content.len() as u64,
        };
        self.vfs
            .write(&sidecar_path(&path), &serde_json::to_string(&meta)?)
            .await?;
        tracing::debug!(%path, "document saved");
        Ok(meta)
    }

    /// Read a document and its sidecar.
    pub async fn open(&self, path: &str) -> anyhow::Result<Document> {
        let path = self.vfs.normalize(path).await?.path;
        let content = self.vfs.read(&path).await?;
        let raw = self.vfs.read(&sidecar_path(&path)).await?;
        let mut meta: DocumentMeta = serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("{}: invalid metadata: {e}", sidecar_path(&path)))?;
        if meta.path.is_empty() {
            meta.path = path;
        }
        Ok(Document { content, meta })
    }

    /// Metadata of every document in `dir`.
    ///
    /// Sidecars that cannot be read or do not parse are skipped. A sidecar
    /// without a `path` gets one derived from its own name.
    pub async fn list(&self, dir: &str) -> VfsResult<Vec<DocumentMeta>> {
        let dir = self.vfs.normalize(dir).await?.path;
        let names = self.vfs.list(&dir).await?;
        let mut docs = Vec::new();
        for name in &names {
            let Some(stem) = name.strip_suffix(".json") else {
                continue;
            };
            // JSON content whose own sidecar sits next to it.
            if names.contains(&format!("{name}.json")) {
                continue;
            }
            let sidecar = path_join(&dir, name);
            let raw = match self.vfs.read(&sidecar).await {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(path = %sidecar, error = %e, "skipping unreadable document metadata");
                    continue;
                }
            };
            match serde_json::from_str::<DocumentMeta>(&raw) {
                Ok(mut meta) => {
                    if meta.path.is_empty() {
                        meta.path = if stem.ends_with(".json") {
                            path_join(&dir, stem)
                        } else {
                            path_join(&dir, &format!("{stem}.{DEFAULT_EXTENSION}"))
                        };
                    }
                    docs.push(meta);
                }
                Err(e) => tracing::warn!(path = %sidecar, error = %e, "skipping unreadable document metadata"),
            }
        }
        Ok(docs)
    }

    /// Remove a document and its sidecar. Failures are logged, not returned.
    pub async fn delete(&self, path: &str) {
        let sidecar = sidecar_path(path);
        if let Err(e) = self.vfs.delete(path).await {
            tracing::warn!(%path, error = %e, "document delete failed");
        }
        if let Err(e) = self.vfs.delete(&sidecar).await {
            tracing::warn!(path = %sidecar, error = %e, "metadata delete failed");
        }
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> DocumentStore {
        let vfs = Arc::new(Vfs::in_memory());
        vfs.initialize().await.unwrap();
        DocumentStore::new(vfs)
    }

    #[test]
    fn sidecar_swaps_extension() {
        assert_eq!(sidecar_path("/docs/a.html"), "/docs/a.json");
        assert_eq!(sidecar_path("/docs/a.b.md"), "/docs/a.b.json");
        assert_eq!(sidecar_path("/docs/plain"), "/docs/plain.json");
        assert_eq!(sidecar_path("/docs/.hidden"), "/docs/.hidden.json");
        assert_eq!(sidecar_path("/docs/data.json"), "/docs/data.json.json");
    }

    #[tokio::test]
    async fn json_content_keeps_its_bytes() {
        let docs = store().await;
        docs.save("/docs/data.json", "[1,2,3]", "Data", "json").await.unwrap();

        assert_eq!(docs.vfs.read("/docs/data.json").await.unwrap(), "[1,2,3]");
        let doc = docs.open("/docs/data.json").await.unwrap();
        assert_eq!(doc.content, "[1,2,3]");
        assert_eq!(doc.meta.title, "Data");

        let listed = docs.list("/docs").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].path, "/docs/data.json");
    }

    #[tokio::test]
    async fn list_skips_sidecars_that_are_not_text() {
        use crate::vfs::{FileKind, FileRecord};

        let docs = store().await;
        docs.save("/docs/good.html", "g", "Good", "html").await.unwrap();
        let mut state = docs.vfs.snapshot().await.unwrap();
        state.files.insert(
            "/docs/bad.json".to_string(),
            FileRecord {
                kind: FileKind::Other,
                ..FileRecord::text("{}")
            },
        );
        docs.vfs.import(state).await.unwrap();

        let listed = docs.list("/docs").await.unwrap();
        let paths: Vec<_> = listed.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(paths, vec!["/docs/good.html"]);
    }

    #[tokio::test]
    async fn save_then_open() {
        let docs = store().await;
        let meta = docs.save("/docs/a.html", "<p>hi</p>", "A", "html").await.unwrap();
        assert_eq!(meta.size, 9);

        let doc = docs.open("/docs/a.html").await.unwrap();
        assert_eq!(doc.content, "<p>hi</p>");
        assert_eq!(doc.meta.title, "A");
        assert_eq!(doc.meta.path, "/docs/a.html");
    }

    #[tokio::test]
    async fn sidecar_uses_mtime_millis() {
        let docs = store().await;
        docs.save("/d/x.html", "x", "X", "html").await.unwrap();
        let raw = docs.vfs.read("/d/x.json").await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value["mtime"].is_i64());
        assert_eq!(value["size"], 1);
    }

    #[tokio::test]
    async fn list_skips_bad_sidecars_and_fills_path() {
        let docs = store().await;
        docs.save("/docs/a.html", "a", "A", "html").await.unwrap();
        docs.vfs.write("/docs/broken.json", "{not json").await.unwrap();
        docs.vfs
            .write("/docs/old.json", r#"{"title":"Old","format":"md","mtime":0,"size":3}"#)
            .await
            .unwrap();

        let mut listed = docs.list("/docs").await.unwrap();
        listed.sort_by(|a, b| a.path.cmp(&b.path));
        let paths: Vec<_> = listed.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(paths, vec!["/docs/a.html", "/docs/old.html"]);
    }

    #[tokio::test]
    async fn delete_removes_both_and_tolerates_missing() {
        let docs = store().await;
        docs.save("/docs/a.html", "a", "A", "html").await.unwrap();
        docs.delete("/docs/a.html").await;
        assert!(!docs.vfs.exists("/docs/a.html").await.unwrap());
        assert!(!docs.vfs.exists("/docs/a.json").await.unwrap());

        docs.delete("/docs/never.html").await;
    }
}
