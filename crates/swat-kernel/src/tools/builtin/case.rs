//! upper, lower — Case conversion.

use async_trait::async_trait;

use super::read_input;
use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};

/// Uppercase stdin or a file.
pub struct Upper;

#[async_trait]
impl Tool for Upper {
    fn name(&self) -> &str {
        "upper"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("upper", "Convert text to uppercase").usage("upper [path]")
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> anyhow::Result<ExecResult> {
        let input = read_input(ctx, "upper", args.operands().first().copied()).await?;
        Ok(ExecResult::success(input.to_uppercase()))
    }
}

/// Lowercase stdin or a file.
pub struct Lower;

#[async_trait]
impl Tool for Lower {
    fn name(&self) -> &str {
        "lower"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("lower", "Convert text to lowercase").usage("lower [path]")
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> anyhow::Result<ExecResult> {
        let input = read_input(ctx, "lower", args.operands().first().copied()).await?;
        Ok(ExecResult::success(input.to_lowercase()))
    }
}
