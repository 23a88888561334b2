//! Virtual Filesystem (VFS) for swat.
//!
//! A path-addressed tree of text files kept in a single storage value:
//!
//! ```text
//! storage key "swat:vfs_state"
//! └── { files: { "/d/a.txt": { type, content, mtime }, ... },
//!       cwd: "/d",
//!       history: ["ls", "cat a.txt", ...] }
//! ```
//!
//! Directories are implicit: a directory exists as long as some file path
//! runs through it. Paths are normalized against the working directory
//! before every lookup (see [`normalize`]).

pub mod events;
mod filesystem;
mod path;
mod state;

pub use events::VfsEvent;
pub use filesystem::{
    DEFAULT_STATE_KEY, FileStat, LoadOutcome, Vfs, VfsError, VfsOptions, VfsResult,
};
pub use path::{NormalizedPath, file_name, normalize, parent, path_join};
pub use state::{DEFAULT_HISTORY_LIMIT, FileKind, FileRecord, VfsState};
