//! Marker spellings the line sanitizer reacts to.
//!
//! Forth has almost no syntax: words are whitespace separated and a handful of words change how the
//! following text is read. Only the markers below matter to the host tooling.
//!
//! ## Notes
//! - Markers are matched against whole whitespace-separated tokens, except the closing markers which are
//!   matched as token *suffixes* (`word)` closes a comment, `word"` closes a string).

/// Line comment: the rest of the line is ignored.
pub const LINE_COMMENT: &str = "\\";

/// Opens a parenthesised comment.
pub const PAREN_OPEN: &str = "(";

/// Suffix that closes a parenthesised comment.
pub const PAREN_CLOSE: char = ')';

/// Suffix of a quote delimiter token (`."`, `s"`, `abc"`).
pub const QUOTE: char = '"';

/// First character of a host directive line.
pub const COMMAND_PREFIX: char = '#';

/// A host directive written inside a line comment (`\ #path lib`).
pub const COMMENTED_COMMAND_PREFIX: &str = "\\ #";

/// The definition marker scanned by the symbol index builder.
pub const COLON: &str = ":";

/// Sentinel word separating user words from system words in a dictionary listing.
pub const MARKER_WORD: &str = "marker";

/// Word sent to the target to list its dictionary.
pub const WORDS_QUERY: &str = "words";

/// Word sent to the target to forget user words back to `marker`.
pub const EMPTY_WORD: &str = "empty";

/// Default extension of Forth source files.
pub const SOURCE_EXTENSION: &str = "frt";

/// Ctrl-O: FlashForth warm start.
pub const WARM_START: &str = "\u{0f}";

/// Check whether a token closes a parenthesised comment.
pub fn closes_comment(token: &str) -> bool {
    token.ends_with(PAREN_CLOSE)
}

/// Check whether a token is a quote delimiter (opening or closing).
pub fn is_quote_delimiter(token: &str) -> bool {
    token.ends_with(QUOTE)
}
