//! stat — Show file metadata.

use async_trait::async_trait;

use super::lines_out;
use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};
use crate::vfs::FileKind;

/// Stat tool: size, kind and modification time of files.
pub struct Stat;

#[async_trait]
impl Tool for Stat {
    fn name(&self) -> &str {
        "stat"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("stat", "Show file size, kind and modification time").usage("stat path...")
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> anyhow::Result<ExecResult> {
        let paths = args.operands();
        if paths.is_empty() {
            anyhow::bail!("stat: missing operand");
        }

        let mut lines = Vec::with_capacity(paths.len());
        for path in paths {
            let resolved = ctx.vfs.normalize(path).await?.path;
            let stat = ctx.vfs.stat(&resolved).await?;
            let kind = match stat.kind {
                FileKind::Text => "text",
                FileKind::Other => "other",
            };
            lines.push(format!(
                "{resolved}\tsize={}\tkind={kind}\tmodified={}",
                stat.size,
                stat.modified_at.to_rfc3339()
            ));
        }
        Ok(ExecResult::success(lines_out(lines)))
    }
}
