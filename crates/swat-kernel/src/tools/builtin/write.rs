//! write — Write text to a file.

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};

/// Write tool: `write path text...` stores the text, `write path` stores stdin.
pub struct Write;

#[async_trait]
impl Tool for Write {
    fn name(&self) -> &str {
        "write"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("write", "Write text (or stdin) to a file").usage("write path [text...]")
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> anyhow::Result<ExecResult> {
        let Some((path, words)) = args.positional.split_first() else {
            anyhow::bail!("write: missing path");
        };

        let content = if words.is_empty() {
            ctx.take_stdin()
        } else {
            words.join(" ")
        };
        ctx.vfs.write(path, &content).await?;
        Ok(ExecResult::success(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::test_support::{args, make_ctx};

    #[tokio::test]
    async fn test_write_args() {
        let mut ctx = make_ctx().await;
        Write.execute(args(&["/a.txt", "hello", "there"]), &mut ctx).await.unwrap();
        assert_eq!(ctx.vfs.read("/a.txt").await.unwrap(), "hello there");
    }

    #[tokio::test]
    async fn test_write_stdin() {
        let mut ctx = make_ctx().await;
        ctx.set_stdin("from pipe".into());
        Write.execute(args(&["b.txt"]), &mut ctx).await.unwrap();
        assert_eq!(ctx.vfs.read("/b.txt").await.unwrap(), "from pipe");
    }

    #[tokio::test]
    async fn test_write_no_path() {
        let mut ctx = make_ctx().await;
        assert!(Write.execute(ToolArgs::new(), &mut ctx).await.is_err());
    }
}
