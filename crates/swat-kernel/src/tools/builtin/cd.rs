//! cd — Change working directory.

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};

/// Cd tool: change current working directory.
///
/// Directories are implicit in the VFS, so any path is accepted.
pub struct Cd;

#[async_trait]
impl Tool for Cd {
    fn name(&self) -> &str {
        "cd"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("cd", "Change current working directory").usage("cd [path]")
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> anyhow::Result<ExecResult> {
        let path = args.get(0).unwrap_or("/");
        ctx.vfs.change_directory(path).await?;
        Ok(ExecResult::success(""))
    }
}
