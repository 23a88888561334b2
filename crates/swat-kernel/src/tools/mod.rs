//! Tools: the handlers a pipeline stage dispatches to.
//!
//! - [`Tool`]: the single `execute` contract every handler implements
//! - [`ToolRegistry`]: name → handler mapping consulted at dispatch time
//! - [`ExecContext`]: stdin plus the filesystem handle, passed to each call
//! - [`builtin`]: the standard command set

pub mod builtin;
mod context;
mod registry;
mod traits;

pub use builtin::register_builtins;
pub use context::ExecContext;
pub use registry::ToolRegistry;
pub use traits::{Tool, ToolArgs, ToolSchema};
