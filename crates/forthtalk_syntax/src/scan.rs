//! Token-level state machines shared by the sanitizer stages.
//!
//! Tokens are whitespace separated. Comment stripping walks them with a [`GroupState`]; quote stripping and the
//! resolver's word scan only track whether they are inside a string.

use forthtalk_core::lang::markers;

/// Where the comment scanner is within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupState {
    #[default]
    Normal,
    InComment,
    InQuote,
}

/// What to do with the token that caused a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenAction {
    Keep,
    Drop,
    /// Line comment: discard this token and everything after it.
    EndOfLine,
}

impl GroupState {
    /// Advance the comment scanner over one token.
    ///
    /// Closing a string is checked before opening one since a single token (`"` or `word"`) can be either.
    /// String contents are kept so uploads carry them; only parenthesised comments are dropped.
    pub fn step(self, token: &str) -> (GroupState, TokenAction) {
        use GroupState::*;

        match self {
            Normal if token == markers::LINE_COMMENT => (Normal, TokenAction::EndOfLine),
            Normal | InComment if token == markers::PAREN_OPEN => (InComment, TokenAction::Drop),
            InComment if markers::closes_comment(token) => (Normal, TokenAction::Drop),
            InComment => (InComment, TokenAction::Drop),
            InQuote if markers::is_quote_delimiter(token) => (Normal, TokenAction::Keep),
            InQuote => (InQuote, TokenAction::Keep),
            Normal if markers::is_quote_delimiter(token) => (InQuote, TokenAction::Keep),
            Normal => (Normal, TokenAction::Keep),
        }
    }

    /// Check whether the scanner is still inside a grouping.
    pub fn is_open(self) -> bool {
        self != GroupState::Normal
    }
}

/// Split a line into whitespace-separated tokens.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Tokens that can name words: everything except the closing delimiter of a string.
///
/// The opening delimiter (`."`, `s"`) is itself a word; the closing one (`world"`) is string data.
pub fn word_tokens(text: &str) -> Vec<&str> {
    let mut in_quotes = false;
    let mut words = Vec::new();
    for token in tokens(text) {
        if markers::is_quote_delimiter(token) {
            if in_quotes {
                in_quotes = false;
                continue;
            }
            in_quotes = true;
        }
        if !in_quotes || markers::is_quote_delimiter(token) {
            words.push(token);
        }
    }
    words
}

/// Apply `f` to each token, keeping the whitespace between tokens exactly as it was.
pub fn map_tokens_preserving<F>(text: &str, mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mut out = String::with_capacity(text.len());
    let mut token_start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(start) = token_start.take() {
                out.push_str(&f(&text[start..i]));
            }
            out.push(c);
        } else if token_start.is_none() {
            token_start = Some(i);
        }
    }
    if let Some(start) = token_start {
        out.push_str(&f(&text[start..]));
    }
    out
}
