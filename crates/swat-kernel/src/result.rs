//! ExecResult — the structured result of every command and pipeline.
//!
//! Exit codes follow shell convention:
//!
//! | code | meaning |
//! |------|---------|
//! | 0    | success |
//! | 1    | the handler failed (or the line could not be run) |
//! | 127  | no handler is registered under the name |

/// Exit code for a successful command.
pub const EXIT_SUCCESS: i64 = 0;
/// Exit code for a handler that raised an error.
pub const EXIT_FAILURE: i64 = 1;
/// Exit code for an unknown command name.
pub const EXIT_NOT_FOUND: i64 = 127;

/// The result of executing a command or pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// Exit code. 0 means success.
    pub code: i64,
    /// Standard output.
    pub out: String,
    /// Standard error.
    pub err: String,
}

impl ExecResult {
    /// Create a successful result with output.
    pub fn success(out: impl Into<String>) -> Self {
        Self {
            code: EXIT_SUCCESS,
            out: out.into(),
            err: String::new(),
        }
    }

    /// Create a failed result with an error message and no output.
    pub fn failure(code: i64, err: impl Into<String>) -> Self {
        Self {
            code,
            out: String::new(),
            err: err.into(),
        }
    }

    /// Create a result from raw output streams.
    pub fn from_output(code: i64, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            code,
            out: stdout.into(),
            err: stderr.into(),
        }
    }

    /// The result reported for a name with no registered handler.
    pub fn command_not_found(name: &str) -> Self {
        Self::failure(EXIT_NOT_FOUND, format!("Command not found: {name}"))
    }

    /// True if the command succeeded (exit code 0).
    pub fn ok(&self) -> bool {
        self.code == EXIT_SUCCESS
    }
}

impl Default for ExecResult {
    fn default() -> Self {
        Self::success("")
    }
}
