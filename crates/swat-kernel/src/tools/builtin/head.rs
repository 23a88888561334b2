//! head — First lines of text.

use async_trait::async_trait;

use super::{count_option, lines_out, operands_without_count, read_input};
use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};

const DEFAULT_LINES: usize = 10;

/// Head tool: print the first N lines.
pub struct Head;

#[async_trait]
impl Tool for Head {
    fn name(&self) -> &str {
        "head"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("head", "Print the first lines of a file or stdin").usage("head [-n N] [path]")
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> anyhow::Result<ExecResult> {
        let count = count_option(&args, "head", DEFAULT_LINES)?;
        let path = operands_without_count(&args).first().copied();
        let input = read_input(ctx, "head", path).await?;
        Ok(ExecResult::success(lines_out(input.lines().take(count))))
    }
}
