//! tee — Copy stdin to a file and to stdout.

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};

/// Tee tool: save stdin to files while passing it through.
///
/// Unlike a redirect, `tee` works in any stage of a pipeline.
pub struct Tee;

#[async_trait]
impl Tool for Tee {
    fn name(&self) -> &str {
        "tee"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("tee", "Copy stdin to files and to stdout").usage("tee [-a] path...")
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> anyhow::Result<ExecResult> {
        let input = ctx.take_stdin();
        let append = args.has_flag("a");

        for path in args.operands() {
            let content = if append {
                let existing = ctx.vfs.read(path).await.unwrap_or_default();
                format!("{existing}{input}")
            } else {
                input.clone()
            };
            ctx.vfs.write(path, &content).await?;
        }
        Ok(ExecResult::success(input))
    }
}
