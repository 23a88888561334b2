//! swat-kernel: a virtual filesystem and command-pipeline kernel.
//!
//! This crate provides:
//!
//! - **Storage**: namespaced JSON values over a pluggable key-value backend
//! - **VFS**: a path-addressed tree of text files persisted as one value
//! - **Parser**: `stage args... | stage args... > target` command lines
//! - **Scheduler**: runs pipelines stage by stage, applying redirects
//! - **Tools**: the registry and the builtin commands
//! - **Documents**: content files with JSON metadata sidecars
//! - **Kernel**: owns all of the above behind one facade
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use swat_kernel::Kernel;
//!
//! let kernel = Kernel::transient()?;
//! kernel.initialize().await?;
//! let result = kernel.execute("echo hi | upper").await;
//! assert_eq!(result.out, "HI\n");
//! # Ok(())
//! # }
//! ```

pub mod ast;
pub mod documents;
pub mod kernel;
pub mod parser;
pub mod paths;
pub mod result;
pub mod scheduler;
pub mod storage;
pub mod tools;
pub mod vfs;

pub use documents::{Document, DocumentMeta, DocumentStore};
pub use kernel::{Kernel, KernelConfig};
pub use result::ExecResult;
pub use tools::{ExecContext, Tool, ToolArgs, ToolRegistry, ToolSchema};
pub use vfs::{LoadOutcome, Vfs, VfsError, VfsEvent};
