//! tail — Last lines of text.

use async_trait::async_trait;

use super::{count_option, lines_out, operands_without_count, read_input};
use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};

const DEFAULT_LINES: usize = 10;

/// Tail tool: print the last N lines.
pub struct Tail;

#[async_trait]
impl Tool for Tail {
    fn name(&self) -> &str {
        "tail"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("tail", "Print the last lines of a file or stdin").usage("tail [-n N] [path]")
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> anyhow::Result<ExecResult> {
        let count = count_option(&args, "tail", DEFAULT_LINES)?;
        let path = operands_without_count(&args).first().copied();
        let input = read_input(ctx, "tail", path).await?;
        let lines: Vec<&str> = input.lines().collect();
        let start = lines.len().saturating_sub(count);
        Ok(ExecResult::success(lines_out(&lines[start..])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::test_support::{args, make_ctx};

    #[tokio::test]
    async fn test_tail_count() {
        let mut ctx = make_ctx().await;
        ctx.set_stdin("a\nb\nc\n".into());
        let result = Tail.execute(args(&["-n", "2"]), &mut ctx).await.unwrap();
        assert_eq!(result.out, "b\nc\n");
    }

    #[tokio::test]
    async fn test_tail_more_than_available() {
        let mut ctx = make_ctx().await;
        ctx.set_stdin("only".into());
        let result = Tail.execute(ToolArgs::new(), &mut ctx).await.unwrap();
        assert_eq!(result.out, "only\n");
    }
}
