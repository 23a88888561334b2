//! grep — Search for patterns in text.

use async_trait::async_trait;
use regex::RegexBuilder;

use super::{lines_out, read_input};
use crate::result::{EXIT_FAILURE, ExecResult};
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};

/// Grep tool: print lines matching a regular expression.
///
/// Exits 1 (with no error text) when nothing matched.
pub struct Grep;

#[async_trait]
impl Tool for Grep {
    fn name(&self) -> &str {
        "grep"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("grep", "Print lines matching a pattern")
            .usage("grep [-i] [-v] [-c] [-n] pattern [path]")
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> anyhow::Result<ExecResult> {
        let operands = args.operands();
        let Some(pattern) = operands.first() else {
            anyhow::bail!("grep: missing pattern");
        };

        let regex = RegexBuilder::new(pattern)
            .case_insensitive(args.has_flag("i"))
            .build()
            .map_err(|e| anyhow::anyhow!("grep: invalid pattern: {e}"))?;
        let invert = args.has_flag("v");
        let count_only = args.has_flag("c");
        let numbered = args.has_flag("n");

        let input = read_input(ctx, "grep", operands.get(1).copied()).await?;

        let matches: Vec<(usize, &str)> = input
            .lines()
            .enumerate()
            .filter(|(_, line)| regex.is_match(line) != invert)
            .collect();

        let out = if count_only {
            format!("{}\n", matches.len())
        } else if numbered {
            lines_out(matches.iter().map(|(i, line)| format!("{}:{line}", i + 1)))
        } else {
            lines_out(matches.iter().map(|(_, line)| *line))
        };

        if matches.is_empty() {
            Ok(ExecResult::from_output(EXIT_FAILURE, out, ""))
        } else {
            Ok(ExecResult::success(out))
        }
    }
}
