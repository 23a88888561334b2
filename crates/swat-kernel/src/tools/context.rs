//! Execution context for tools.

use std::sync::Arc;

use super::traits::ToolSchema;
use crate::vfs::Vfs;

/// Execution context passed to tools.
///
/// Carries the filesystem handle, the stage's stdin and what the tool may
/// want to know about its surroundings. Working directory lives in the
/// VFS, so `cd` in one stage is visible to every later one.
pub struct ExecContext {
    /// Virtual filesystem.
    pub vfs: Arc<Vfs>,
    /// Standard input for the tool (previous stage's stdout, or empty).
    pub stdin: String,
    /// Index of this stage in its pipeline.
    pub stage: usize,
    /// Schemas of every registered tool, for `help`.
    pub tool_schemas: Vec<ToolSchema>,
}

impl ExecContext {
    /// Create a new execution context with empty stdin.
    pub fn new(vfs: Arc<Vfs>) -> Self {
        Self {
            vfs,
            stdin: String::new(),
            stage: 0,
            tool_schemas: Vec::new(),
        }
    }

    /// Set stdin for this execution.
    pub fn set_stdin(&mut self, stdin: String) {
        self.stdin = stdin;
    }

    /// Get stdin, leaving it empty.
    pub fn take_stdin(&mut self) -> String {
        std::mem::take(&mut self.stdin)
    }

    /// Set the tool schemas available for introspection.
    pub fn set_tool_schemas(&mut self, schemas: Vec<ToolSchema>) {
        self.tool_schemas = schemas;
    }
}
