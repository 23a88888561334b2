//! wc — Count lines, words and bytes.

use async_trait::async_trait;

use super::read_input;
use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};

/// Word count tool.
pub struct Wc;

#[async_trait]
impl Tool for Wc {
    fn name(&self) -> &str {
        "wc"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("wc", "Count lines, words and bytes").usage("wc [-l] [-w] [-c] [path]")
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> anyhow::Result<ExecResult> {
        let path = args.operands().first().copied();
        let input = read_input(ctx, "wc", path).await?;

        let lines = input.lines().count();
        let words = input.split_whitespace().count();
        let bytes = input.len();

        let (l, w, c) = (args.has_flag("l"), args.has_flag("w"), args.has_flag("c"));
        let all = !(l || w || c);

        let mut counts = Vec::new();
        if all || l {
            counts.push(lines.to_string());
        }
        if all || w {
            counts.push(words.to_string());
        }
        if all || c {
            counts.push(bytes.to_string());
        }
        if let Some(path) = path {
            counts.push(path.to_string());
        }

        Ok(ExecResult::success(format!("{}\n", counts.join(" "))))
    }
}
