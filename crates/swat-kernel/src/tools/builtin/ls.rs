//! ls — List directory contents.

use async_trait::async_trait;

use super::lines_out;
use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};
use crate::vfs::path_join;

/// Ls tool: list the files directly inside a directory.
pub struct Ls;

#[async_trait]
impl Tool for Ls {
    fn name(&self) -> &str {
        "ls"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("ls", "List files in a directory").usage("ls [-l] [dir]")
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> anyhow::Result<ExecResult> {
        let dir = args.operands().first().copied().unwrap_or(".");
        let dir = ctx.vfs.normalize(dir).await?.path;
        let names = ctx.vfs.list(&dir).await?;

        if !args.has_flag("l") {
            return Ok(ExecResult::success(lines_out(names)));
        }

        let mut lines = Vec::with_capacity(names.len());
        for name in names {
            let stat = ctx.vfs.stat(&path_join(&dir, &name)).await?;
            lines.push(format!(
                "{:>8}  {}  {}",
                stat.size,
                stat.modified_at.format("%Y-%m-%d %H:%M"),
                name
            ));
        }
        Ok(ExecResult::success(lines_out(lines)))
    }
}
