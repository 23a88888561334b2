//! XDG Base Directory paths for swat state.
//!
//! | Purpose | XDG Variable | Default | swat Path |
//! |---------|--------------|---------|-----------|
//! | Kernel state | `$XDG_DATA_HOME` | `~/.local/share` | `$XDG_DATA_HOME/swat/kernels/*.json` |
//! | REPL history | `$XDG_DATA_HOME` | `~/.local/share` | `$XDG_DATA_HOME/swat/repl_history` |
//!
//! `$SWAT_DATA_DIR` replaces the whole `$XDG_DATA_HOME/swat` directory.

use std::path::PathBuf;

use directories::BaseDirs;

/// Environment variable overriding [`data_dir`].
pub const DATA_DIR_ENV: &str = "SWAT_DATA_DIR";

/// Get the data directory for persistent state.
///
/// Uses `$SWAT_DATA_DIR`, then `$XDG_DATA_HOME/swat`, then
/// `~/.local/share/swat`.
pub fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    BaseDirs::new()
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(|| home_fallback().join(".local").join("share"))
        .join("swat")
}

/// Directory holding one state file per named kernel.
pub fn kernels_dir() -> PathBuf {
    data_dir().join("kernels")
}

/// State file for the kernel called `name`.
pub fn kernel_state_file(name: &str) -> PathBuf {
    kernels_dir().join(format!("{name}.json"))
}

/// Line-editor history file for the REPL.
pub fn repl_history_file() -> PathBuf {
    data_dir().join("repl_history")
}

/// Fallback home directory when BaseDirs fails.
fn home_fallback() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}
