//! Persisted VFS state.
//!
//! The whole tree, the working directory and the command history travel
//! together as one JSON blob under a single storage key.

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default bound on the history log.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Kind of a stored file. Only text is produced; anything else found in
/// stored data is kept as `Other` and cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Text,
    #[serde(other)]
    Other,
}

/// A single file in the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    #[serde(rename = "type")]
    pub kind: FileKind,
    pub content: String,
    #[serde(rename = "mtime", with = "chrono::serde::ts_milliseconds")]
    pub modified_at: DateTime<Utc>,
}

impl FileRecord {
    /// A text file modified now.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: FileKind::Text,
            content: content.into(),
            modified_at: Utc::now(),
        }
    }

    /// Size of the content in bytes.
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// Everything the VFS persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VfsState {
    pub files: BTreeMap<String, FileRecord>,
    pub cwd: String,
    pub history: VecDeque<String>,
}

impl Default for VfsState {
    fn default() -> Self {
        Self {
            files: BTreeMap::new(),
            cwd: "/".to_string(),
            history: VecDeque::new(),
        }
    }
}

impl VfsState {
    /// Append to history, evicting from the front past `limit`.
    pub fn push_history(&mut self, command: impl Into<String>, limit: usize) {
        self.history.push_back(command.into());
        while self.history.len() > limit {
            self.history.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_evicts_oldest_first() {
        let mut state = VfsState::default();
        for i in 0..105 {
            state.push_history(format!("cmd {i}"), DEFAULT_HISTORY_LIMIT);
        }
        assert_eq!(state.history.len(), 100);
        assert_eq!(state.history.front().map(String::as_str), Some("cmd 5"));
        assert_eq!(state.history.back().map(String::as_str), Some("cmd 104"));
    }

    #[test]
    fn serialized_layout() {
        let mut state = VfsState::default();
        let mut record = FileRecord::text("hi");
        record.modified_at = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        state.files.insert("/a.txt".into(), record);

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["cwd"], "/");
        assert_eq!(json["files"]["/a.txt"]["type"], "text");
        assert_eq!(json["files"]["/a.txt"]["content"], "hi");
        assert_eq!(json["files"]["/a.txt"]["mtime"], 1_700_000_000_000_i64);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let state: VfsState = serde_json::from_str(r#"{"files":{}}"#).unwrap();
        assert_eq!(state.cwd, "/");
        assert!(state.history.is_empty());
    }

    #[test]
    fn unknown_file_kind_is_other() {
        let record: FileRecord =
            serde_json::from_str(r#"{"type":"blob","content":"","mtime":0}"#).unwrap();
        assert_eq!(record.kind, FileKind::Other);
    }
}
