//! Syntax types for swat command lines.
//!
//! A line is a pipeline of commands; the parser produces these, the
//! [`PipelineRunner`](crate::scheduler::PipelineRunner) runs them.

use std::fmt;

/// A command invocation: one stage of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub args: Vec<String>,
    pub redirect: Option<Redirect>,
}

impl Command {
    /// A command with no redirect.
    pub fn new<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
            redirect: None,
        }
    }
}

/// Commands connected by pipes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    pub commands: Vec<Command>,
}

impl Pipeline {
    /// True when there are no stages at all.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The redirect that will actually be applied: only a single-stage
    /// pipeline honors one.
    pub fn effective_redirect(&self) -> Option<&Redirect> {
        match self.commands.as_slice() {
            [only] => only.redirect.as_ref(),
            _ => None,
        }
    }
}

/// Where a command's final stdout goes instead of the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub mode: RedirectMode,
    pub target: String,
}

/// `>` or `>>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    /// `>` replaces the target's content.
    Overwrite,
    /// `>>` appends to the target's content.
    Append,
}

impl RedirectMode {
    /// Recognize a redirect token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            ">" => Some(Self::Overwrite),
            ">>" => Some(Self::Append),
            _ => None,
        }
    }
}

impl fmt::Display for RedirectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overwrite => write!(f, ">"),
            Self::Append => write!(f, ">>"),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        if let Some(redirect) = &self.redirect {
            write!(f, " {} {}", redirect.mode, redirect.target)?;
        }
        Ok(())
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{cmd}")?;
        }
        Ok(())
    }
}
