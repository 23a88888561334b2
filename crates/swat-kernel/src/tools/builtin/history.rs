//! history — Show recorded command history.

use async_trait::async_trait;

use super::lines_out;
use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};

/// History tool: numbered list of past command lines, oldest first.
pub struct History;

#[async_trait]
impl Tool for History {
    fn name(&self) -> &str {
        "history"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("history", "Show command history").usage("history [count]")
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> anyhow::Result<ExecResult> {
        let entries = ctx.vfs.history().await?;
        let skip = match args.get(0) {
            Some(raw) => {
                let count: usize = raw
                    .parse()
                    .map_err(|_| anyhow::anyhow!("history: invalid count '{raw}'"))?;
                entries.len().saturating_sub(count)
            }
            None => 0,
        };

        let lines = entries
            .iter()
            .enumerate()
            .skip(skip)
            .map(|(i, line)| format!("{:>5}  {line}", i + 1));
        Ok(ExecResult::success(lines_out(lines)))
    }
}
