//! help — List available tools.

use async_trait::async_trait;

use super::lines_out;
use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};

/// Help tool: one line per registered tool, or the usage of one tool.
pub struct Help;

#[async_trait]
impl Tool for Help {
    fn name(&self) -> &str {
        "help"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("help", "List available tools").usage("help [tool]")
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> anyhow::Result<ExecResult> {
        if let Some(name) = args.get(0) {
            let Some(schema) = ctx.tool_schemas.iter().find(|s| s.name == name) else {
                anyhow::bail!("help: no such tool: {name}");
            };
            return Ok(ExecResult::success(format!(
                "{}\n  {}\n",
                schema.usage, schema.description
            )));
        }

        let width = ctx
            .tool_schemas
            .iter()
            .map(|s| s.name.len())
            .max()
            .unwrap_or(0);
        let lines = ctx
            .tool_schemas
            .iter()
            .map(|s| format!("{:<width$}  {}", s.name, s.description));
        Ok(ExecResult::success(lines_out(lines)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::test_support::{args, make_ctx};

    fn schemas() -> Vec<ToolSchema> {
        vec![
            ToolSchema::new("cat", "Concatenate files").usage("cat [path...]"),
            ToolSchema::new("ls", "List a directory"),
        ]
    }

    #[tokio::test]
    async fn test_help_lists_tools() {
        let mut ctx = make_ctx().await;
        ctx.set_tool_schemas(schemas());
        let result = Help.execute(ToolArgs::new(), &mut ctx).await.unwrap();
        assert_eq!(result.out, "cat  Concatenate files\nls   List a directory\n");
    }

    #[tokio::test]
    async fn test_help_single_tool() {
        let mut ctx = make_ctx().await;
        ctx.set_tool_schemas(schemas());
        let result = Help.execute(args(&["cat"]), &mut ctx).await.unwrap();
        assert_eq!(result.out, "cat [path...]\n  Concatenate files\n");
    }

    #[tokio::test]
    async fn test_help_unknown_tool() {
        let mut ctx = make_ctx().await;
        assert!(Help.execute(args(&["zzz"]), &mut ctx).await.is_err());
    }
}
