//! Core tool traits and types.

use async_trait::async_trait;

use super::context::ExecContext;
use crate::result::ExecResult;

/// Schema describing a tool, used for `help` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSchema {
    /// Tool name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Usage line, e.g. `cat [path]`.
    pub usage: String,
}

impl ToolSchema {
    /// Create a new tool schema. Usage defaults to the bare name.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            usage: name.clone(),
            name,
            description: description.into(),
        }
    }

    /// Set the usage line.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }
}

/// Arguments for one stage: the whitespace-split tokens after the name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolArgs {
    /// Tokens in order, flags included.
    pub positional: Vec<String>,
}

impl ToolArgs {
    /// Create empty args.
    pub fn new() -> Self {
        Self::default()
    }

    /// Args from a list of tokens.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            positional: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Get a positional argument by index, counting flags.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(String::as_str)
    }

    /// Arguments that are not flags (do not start with `-`, or are exactly `-`).
    pub fn operands(&self) -> Vec<&str> {
        self.positional
            .iter()
            .map(String::as_str)
            .filter(|a| !is_flag(a))
            .collect()
    }

    /// Check for a short (`-n`, also inside `-in`) or long (`--name`) flag.
    pub fn has_flag(&self, name: &str) -> bool {
        self.positional.iter().any(|arg| {
            if let Some(long) = arg.strip_prefix("--") {
                long == name
            } else if let Some(short) = arg.strip_prefix('-') {
                name.len() == 1 && is_flag(arg) && short.contains(name)
            } else {
                false
            }
        })
    }

    /// Value following an option such as `-n 5`, if present.
    pub fn option_value(&self, option: &str) -> Option<&str> {
        let idx = self.positional.iter().position(|a| a == option)?;
        self.get(idx + 1)
    }

    /// True if there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty()
    }
}

fn is_flag(arg: &str) -> bool {
    arg.len() > 1 && arg.starts_with('-')
}

/// A command handler.
///
/// Returning `Err` is a handler failure: the executor turns it into exit
/// code 1 with the error's message on stderr. Handlers that want to fail
/// with a specific code return `Ok(ExecResult::failure(..))` instead.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the tool registers under by default.
    fn name(&self) -> &str;

    /// Description for `help`.
    fn schema(&self) -> ToolSchema;

    /// Run the tool.
    async fn execute(&self, args: ToolArgs, ctx: &mut ExecContext) -> anyhow::Result<ExecResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_and_operands() {
        let args = ToolArgs::from_tokens(["-in", "pattern", "--count", "-", "file.txt"]);
        assert!(args.has_flag("i"));
        assert!(args.has_flag("n"));
        assert!(args.has_flag("count"));
        assert!(!args.has_flag("v"));
        assert_eq!(args.operands(), vec!["pattern", "-", "file.txt"]);
    }

    #[test]
    fn option_value_reads_next_token() {
        let args = ToolArgs::from_tokens(["-n", "3", "log.txt"]);
        assert_eq!(args.option_value("-n"), Some("3"));
        assert_eq!(args.option_value("-c"), None);
    }
}
