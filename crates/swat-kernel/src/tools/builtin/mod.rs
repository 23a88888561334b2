//! Built-in tools for swat.
//!
//! These tools are always available and operate on the VFS. Text tools
//! (`cat`, `grep`, `wc`, ...) read the named file, or stdin when no file
//! is given.

mod case;
mod cat;
mod cd;
mod echo;
mod grep;
mod head;
mod help;
mod history;
mod ls;
mod pwd;
mod rm;
mod stat;
mod tail;
mod tee;
mod wc;
mod write;

use anyhow::Context;

use super::{ExecContext, ToolRegistry};

/// Register all built-in tools with the registry.
pub fn register_builtins(registry: &mut ToolRegistry) {
    registry.register(echo::Echo);
    registry.register(cat::Cat);
    registry.register(ls::Ls);
    registry.register(pwd::Pwd);
    registry.register(cd::Cd);
    registry.register(rm::Rm);
    registry.register(stat::Stat);
    registry.register(write::Write);
    registry.register(tee::Tee);
    registry.register(history::History);
    registry.register(grep::Grep);
    registry.register(wc::Wc);
    registry.register(head::Head);
    registry.register(tail::Tail);
    registry.register(case::Upper);
    registry.register(case::Lower);
    registry.register(help::Help);
}

/// Read the named file, or take stdin when there is no path (or it is `-`).
async fn read_input(ctx: &mut ExecContext, tool: &str, path: Option<&str>) -> anyhow::Result<String> {
    match path {
        None | Some("-") => Ok(ctx.take_stdin()),
        Some(path) => ctx
            .vfs
            .read(path)
            .await
            .with_context(|| format!("{tool}: {path}")),
    }
}

/// Join lines with `\n`, ending with a newline unless there are none.
fn lines_out<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    out
}

/// Parse a `-n N` style count, falling back to `default`.
fn count_option(args: &super::ToolArgs, tool: &str, default: usize) -> anyhow::Result<usize> {
    match args.option_value("-n") {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{tool}: invalid line count '{raw}'")),
    }
}

/// Operands with any `-n N` pair removed.
fn operands_without_count(args: &super::ToolArgs) -> Vec<&str> {
    let mut skip_next = false;
    let mut operands = Vec::new();
    for arg in &args.positional {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "-n" {
            skip_next = true;
            continue;
        }
        if arg.len() > 1 && arg.starts_with('-') {
            continue;
        }
        operands.push(arg.as_str());
    }
    operands
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::tools::{ExecContext, ToolArgs};
    use crate::vfs::Vfs;

    /// A context over a fresh, initialized in-memory VFS.
    pub async fn make_ctx() -> ExecContext {
        let vfs = Vfs::in_memory();
        vfs.initialize().await.unwrap();
        ExecContext::new(Arc::new(vfs))
    }

    /// Args from string tokens.
    pub fn args(tokens: &[&str]) -> ToolArgs {
        ToolArgs::from_tokens(tokens.iter().copied())
    }
}
