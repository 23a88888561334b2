//! cat — Read and output file contents.

use async_trait::async_trait;

use super::read_input;
use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};

/// Cat tool: concatenate files, or pass stdin through.
pub struct Cat;

#[async_trait]
impl Tool for Cat {
    fn name(&self) -> &str {
        "cat"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("cat", "Read and output file contents").usage("cat [path...]")
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> anyhow::Result<ExecResult> {
        let paths = args.operands();
        if paths.is_empty() {
            return Ok(ExecResult::success(ctx.take_stdin()));
        }

        let mut out = String::new();
        for path in paths {
            out.push_str(&read_input(ctx, "cat", Some(path)).await?);
        }
        Ok(ExecResult::success(out))
    }
}
