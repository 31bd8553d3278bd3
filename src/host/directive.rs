//! Parsing host command lines into directives.

use std::fmt;

use forthtalk_core::lang::directives::{self, DirectiveId};
use forthtalk_core::lang::markers;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    #[error("Command not recognised: {name}")]
    UnknownDirective { name: String },

    #[error("not a host command: {line}")]
    NotACommand { line: String },
}

/// A parsed command line: which directive, and the rest of the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub id: DirectiveId,
    /// Everything after the directive word, trimmed (may be empty)
    pub args: String,
}

impl Directive {
    /// Parse `#name args...`.
    ///
    /// The text must already have any `\ ` prefix removed (see [`forthtalk_syntax::SourceLine`]).
    pub fn parse(line: &str) -> Result<Self, DirectiveError> {
        let line = line.trim();
        if !line.starts_with(markers::COMMAND_PREFIX) {
            return Err(DirectiveError::NotACommand { line: line.to_string() });
        }

        let (name, args) = match line.split_once(char::is_whitespace) {
            Some((name, args)) => (name, args.trim()),
            None => (line, ""),
        };
        let id = directives::from_str(name).ok_or_else(|| DirectiveError::UnknownDirective {
            name: name.to_string(),
        })?;

        Ok(Self {
            id,
            args: args.to_string(),
        })
    }

    pub fn new(id: DirectiveId, args: impl Into<String>) -> Self {
        Self { id, args: args.into() }
    }

    /// Whitespace-separated arguments.
    pub fn arg_words(&self) -> impl Iterator<Item = &str> {
        self.args.split_whitespace()
    }

    pub fn has_args(&self) -> bool {
        !self.args.is_empty()
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = directives::as_str(self.id);
        if self.args.is_empty() {
            write!(f, "{name}")
        } else {
            write!(f, "{name} {}", self.args)
        }
    }
}
