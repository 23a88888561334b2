//! rm — Remove files.

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};

/// Rm tool: delete files. Missing files are not an error.
pub struct Rm;

#[async_trait]
impl Tool for Rm {
    fn name(&self) -> &str {
        "rm"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("rm", "Remove files").usage("rm path...")
    }

    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> anyhow::Result<ExecResult> {
        let paths = args.operands();
        if paths.is_empty() {
            anyhow::bail!("rm: missing operand");
        }
        for path in paths {
            ctx.vfs.delete(path).await?;
        }
        Ok(ExecResult::success(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::test_support::{args, make_ctx};

    #[tokio::test]
    async fn test_rm_file() {
        let mut ctx = make_ctx().await;
        ctx.vfs.write("/file.txt", "data").await.unwrap();
        let result = Rm.execute(args(&["/file.txt"]), &mut ctx).await.unwrap();
        assert!(result.ok());
        assert!(!ctx.vfs.exists("/file.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_rm_missing_is_ok() {
        let mut ctx = make_ctx().await;
        let result = Rm.execute(args(&["/ghost"]), &mut ctx).await.unwrap();
        assert!(result.ok());
    }

    #[tokio::test]
    async fn test_rm_multiple() {
        let mut ctx = make_ctx().await;
        ctx.vfs.write("/a", "1").await.unwrap();
        ctx.vfs.write("/b", "2").await.unwrap();
        Rm.execute(args(&["/a", "/b"]), &mut ctx).await.unwrap();
        assert!(ctx.vfs.list("/").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rm_no_arg() {
        let mut ctx = make_ctx().await;
        let err = Rm.execute(ToolArgs::new(), &mut ctx).await.unwrap_err();
        assert!(err.to_string().contains("missing operand"));
    }
}
