//! Warnings produced while sanitizing and scanning source lines.
//!
//! None of these stop processing: the caller logs them, keeps going, and may return them alongside its result.

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Which kind of grouping was left open at the end of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    Comment,
    Quote,
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKind::Comment => write!(f, "comment"),
            GroupKind::Quote => write!(f, "quote"),
        }
    }
}

/// A recoverable problem found in a line or a directive argument.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum Warning {
    #[error("unterminated {kind}: {line}")]
    #[diagnostic(
        code(forthtalk::unterminated_grouping),
        severity(Warning),
        help("comments and strings must close on the line they open")
    )]
    UnterminatedGrouping { kind: GroupKind, line: String },

    #[error("no word after defining word ':' in: {line}")]
    #[diagnostic(code(forthtalk::malformed_definition), severity(Warning))]
    MalformedDefinition { line: String },

    #[error("literal {name} value {old} overwritten with: {new}")]
    #[diagnostic(code(forthtalk::register_overwritten), severity(Warning))]
    RegisterOverwritten { name: String, old: String, new: String },

    #[error("incorrectly formed literal definition: {pair}")]
    #[diagnostic(
        code(forthtalk::malformed_literal),
        severity(Warning),
        help("literal definitions are written name:value, e.g. SPI_MOSI:$3")
    )]
    MalformedLiteral { pair: String },
}
