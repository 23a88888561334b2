//! echo — Print arguments to stdout.

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};

/// Echo tool: prints arguments to stdout, newline-terminated.
pub struct Echo;

#[async_trait]
impl Tool for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("echo", "Print arguments to standard output").usage("echo [-n] [text...]")
    }

    async fn execute(&self, args: ToolArgs, _ctx: &mut ExecContext) -> anyhow::Result<ExecResult> {
        let (newline, words) = match args.positional.split_first() {
            Some((first, rest)) if first == "-n" => (false, rest),
            _ => (true, args.positional.as_slice()),
        };

        let mut output = words.join(" ");
        if newline {
            output.push('\n');
        }
        Ok(ExecResult::success(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::test_support::{args, make_ctx};

    #[tokio::test]
    async fn test_echo_simple() {
        let mut ctx = make_ctx().await;
        let result = Echo.execute(args(&["hello"]), &mut ctx).await.unwrap();
        assert!(result.ok());
        assert_eq!(result.out, "hello\n");
    }

    #[tokio::test]
    async fn test_echo_multiple() {
        let mut ctx = make_ctx().await;
        let result = Echo.execute(args(&["hello", "world"]), &mut ctx).await.unwrap();
        assert_eq!(result.out, "hello world\n");
    }

    #[tokio::test]
    async fn test_echo_no_newline() {
        let mut ctx = make_ctx().await;
        let result = Echo.execute(args(&["-n", "hi"]), &mut ctx).await.unwrap();
        assert_eq!(result.out, "hi");
    }

    #[tokio::test]
    async fn test_echo_empty() {
        let mut ctx = make_ctx().await;
        let result = Echo.execute(ToolArgs::new(), &mut ctx).await.unwrap();
        assert_eq!(result.out, "\n");
    }
}
