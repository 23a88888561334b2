//! Pipeline execution for swat.
//!
//! Executes a sequence of commands connected by pipes, where the stdout
//! of each command becomes the stdin of the next.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::ast::{Command, Pipeline, Redirect, RedirectMode};
use crate::parser::parse;
use crate::result::{EXIT_FAILURE, ExecResult};
use crate::tools::{ExecContext, ToolArgs, ToolRegistry, ToolSchema};
use crate::vfs::{Vfs, VfsResult};

/// Runs pipelines against a tool registry and a filesystem.
///
/// The runner never fails: unknown commands, handler errors, syntax errors
/// and redirect failures all come back as an [`ExecResult`].
///
/// - Stages run one after another; stage 0 reads empty stdin.
/// - A failing stage does not stop the pipeline.
/// - stderr from every stage is concatenated in order.
/// - The exit code is the last stage's.
/// - A redirect is applied only when the pipeline has exactly one stage.
pub struct PipelineRunner {
    tools: Arc<RwLock<ToolRegistry>>,
    vfs: Arc<Vfs>,
}

impl PipelineRunner {
    /// Create a new pipeline runner.
    pub fn new(tools: Arc<RwLock<ToolRegistry>>, vfs: Arc<Vfs>) -> Self {
        Self { tools, vfs }
    }

    /// The registry stages resolve against.
    pub fn tools(&self) -> &Arc<RwLock<ToolRegistry>> {
        &self.tools
    }

    /// Parse and run a command line.
    pub async fn run_line(&self, line: &str) -> ExecResult {
        match parse(line) {
            Ok(pipeline) => self.run(&pipeline).await,
            Err(e) => ExecResult::failure(EXIT_FAILURE, e.to_string()),
        }
    }

    /// Execute a parsed pipeline.
    pub async fn run(&self, pipeline: &Pipeline) -> ExecResult {
        if pipeline.is_empty() {
            return ExecResult::success("");
        }

        let schemas = self.tools.read().await.schemas();

        let mut stdin = String::new();
        let mut err = String::new();
        let mut code = 0;
        for (stage, cmd) in pipeline.commands.iter().enumerate() {
            let result = self
                .run_command(cmd, stage, std::mem::take(&mut stdin), &schemas)
                .await;
            err.push_str(&result.err);
            code = result.code;
            stdin = result.out;
        }
        let mut out = stdin;

        if let Some(redirect) = pipeline.effective_redirect() {
            match self.apply_redirect(redirect, &out).await {
                Ok(()) => out.clear(),
                Err(e) => {
                    tracing::debug!(path = %redirect.target, error = %e, "redirect failed");
                    err.push_str(&format!("{}: {}", redirect.target, e));
                    code = EXIT_FAILURE;
                }
            }
        } else if pipeline.commands.len() > 1 && pipeline.commands.iter().any(|c| c.redirect.is_some()) {
            tracing::debug!("redirect ignored in multi-stage pipeline");
        }

        ExecResult::from_output(code, out, err)
    }

    /// Run one stage with the given stdin.
    async fn run_command(
        &self,
        cmd: &Command,
        stage: usize,
        stdin: String,
        schemas: &[ToolSchema],
    ) -> ExecResult {
        // Resolve and release the lock before running: a tool may register others.
        let tool = self.tools.read().await.get(&cmd.name);
        let Some(tool) = tool else {
            tracing::debug!(name = %cmd.name, stage, "command not found");
            return ExecResult::command_not_found(&cmd.name);
        };

        let mut ctx = ExecContext::new(self.vfs.clone());
        ctx.set_stdin(stdin);
        ctx.stage = stage;
        ctx.set_tool_schemas(schemas.to_vec());

        let args = ToolArgs::from_tokens(cmd.args.iter().cloned());
        match tool.execute(args, &mut ctx).await {
            Ok(result) => result,
            Err(e) => {
                tracing::debug!(name = %cmd.name, stage, error = %e, "handler failed");
                ExecResult::failure(EXIT_FAILURE, format!("{e:#}"))
            }
        }
    }

    async fn apply_redirect(&self, redirect: &Redirect, out: &str) -> VfsResult<()> {
        match redirect.mode {
            RedirectMode::Overwrite => self.vfs.write(&redirect.target, out).await,
            RedirectMode::Append => {
                let existing = self.vfs.read(&redirect.target).await.unwrap_or_default();
                self.vfs
                    .write(&redirect.target, &format!("{existing}{out}"))
                    .await
            }
        }
    }
}
