//! pwd — Print working directory.

use async_trait::async_trait;

use crate::result::ExecResult;
use crate::tools::{ExecContext, Tool, ToolArgs, ToolSchema};

/// Pwd tool: print the current working directory.
pub struct Pwd;

#[async_trait]
impl Tool for Pwd {
    fn name(&self) -> &str {
        "pwd"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new("pwd", "Print current working directory")
    }

    async fn execute(&self, _args: ToolArgs, ctx: &mut ExecContext) -> anyhow::Result<ExecResult> {
        let cwd = ctx.vfs.cwd().await?;
        Ok(ExecResult::success(format!("{cwd}\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::builtin::test_support::make_ctx;

    #[tokio::test]
    async fn test_pwd_root() {
        let mut ctx = make_ctx().await;
        let result = Pwd.execute(ToolArgs::new(), &mut ctx).await.unwrap();
        assert_eq!(result.out, "/\n");
    }

    #[tokio::test]
    async fn test_pwd_after_cd() {
        let mut ctx = make_ctx().await;
        ctx.vfs.change_directory("/a/b").await.unwrap();
        let result = Pwd.execute(ToolArgs::new(), &mut ctx).await.unwrap();
        assert_eq!(result.out, "/a/b\n");
    }
}
