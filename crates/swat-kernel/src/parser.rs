//! Parser for swat command lines.
//!
//! The grammar is deliberately flat:
//!
//! ```text
//! line     := stage ( "|" stage )*
//! stage    := name arg* ( (">" | ">>") target )? arg*
//! ```
//!
//! Stages are split on `|` and tokens on whitespace. There is no quoting:
//! a `|` anywhere splits the line. Only the first redirect marker in a
//! stage counts; later `>` tokens stay in the arguments.

use crate::ast::{Command, Pipeline, Redirect, RedirectMode};

/// A line that cannot be turned into a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// `>` or `>>` was the last token of its stage.
    #[error("syntax error: expected a path after '{mode}' in stage {stage}")]
    MissingRedirectTarget { mode: RedirectMode, stage: usize },
}

/// Parse a command line into a pipeline.
///
/// Every line has at least one stage. An empty stage (as in `a || b`, or a
/// blank line) yields a command with an empty name.
pub fn parse(line: &str) -> Result<Pipeline, ParseError> {
    let commands = line
        .split('|')
        .enumerate()
        .map(|(stage, text)| parse_command(text.trim(), stage))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Pipeline { commands })
}

fn parse_command(text: &str, stage: usize) -> Result<Command, ParseError> {
    let mut tokens: Vec<String> = text.split_whitespace().map(str::to_string).collect();

    let mut redirect = None;
    let marker = tokens
        .iter()
        .enumerate()
        .find_map(|(i, t)| RedirectMode::from_token(t).map(|mode| (i, mode)));
    if let Some((idx, mode)) = marker {
        if idx + 1 >= tokens.len() {
            return Err(ParseError::MissingRedirectTarget { mode, stage });
        }
        let target = tokens.remove(idx + 1);
        tokens.remove(idx);
        redirect = Some(Redirect { mode, target });
    }

    let mut tokens = tokens.into_iter();
    let name = tokens.next().unwrap_or_default();
    Ok(Command {
        name,
        args: tokens.collect(),
        redirect,
    })
}
