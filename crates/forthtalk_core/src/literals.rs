//! Numeric literal classification and hex case normalization.
//!
//! The target accepts number prefixes (`%` binary, `#` decimal, `$` hex) and, in `hex` mode, bare hex digits.
//! A trailing `.` marks a double-cell number. The host never evaluates literals; it only needs to know that a
//! token *is* one so the resolver does not look it up as a word, and to lowercase hex digits before upload.
//!
//! ## Notes
//! - Bare tokens made only of `0-9A-F` and `.` are literals. This is a syntactic heuristic: a word whose name
//!   is all upper case hex digits (`ADD` is not, `FACE` is) is treated as a literal and never resolved.
//! - [`normalize_hex_token`] turns `D.` into `d.`, which is also the name of a standard word. Write `0D.`
//!   when the literal is intended.

use std::borrow::Cow;

/// The kind of numeric literal a token was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    /// `%1010`
    Binary,
    /// `#1234`
    Decimal,
    /// `$1ae`
    Hex,
    /// `FF00`, `123`, `1AE.`
    BareHex,
}

/// Classify a single whitespace-free token.
///
/// ## Returns
/// - `Some(kind)` when the token is a numeric literal, `None` for anything else.
///
/// ## Examples
/// ```rust
/// use forthtalk_core::literals::{classify_literal, LiteralKind};
///
/// assert_eq!(classify_literal("%101"), Some(LiteralKind::Binary));
/// assert_eq!(classify_literal("#123"), Some(LiteralKind::Decimal));
/// assert_eq!(classify_literal("$1ae"), Some(LiteralKind::Hex));
/// assert_eq!(classify_literal("FF00"), Some(LiteralKind::BareHex));
/// assert_eq!(classify_literal("MARKER"), None);
/// ```
pub fn classify_literal(token: &str) -> Option<LiteralKind> {
    if let Some(rest) = token.strip_prefix('%') {
        if rest.chars().all(|c| matches!(c, '0' | '1' | '.')) {
            return Some(LiteralKind::Binary);
        }
    }
    if let Some(rest) = token.strip_prefix('#') {
        if rest.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Some(LiteralKind::Decimal);
        }
    }
    if let Some(rest) = token.strip_prefix('$') {
        if rest.chars().all(|c| c.is_ascii_hexdigit() || c == '.') {
            return Some(LiteralKind::Hex);
        }
    }
    if !token.is_empty() && token.chars().all(|c| is_upper_hex_digit(c) || c == '.') {
        return Some(LiteralKind::BareHex);
    }
    None
}

/// Check whether a token is a numeric literal of any kind.
pub fn is_literal(token: &str) -> bool {
    classify_literal(token).is_some()
}

/// Lowercase a token if it is a hex number.
///
/// An optional trailing `.` and an optional leading `$` are ignored for the test (each only when the token is
/// longer than one character). The remainder must be all `0-9A-F` or all `0-9a-f`; mixed case words are left
/// alone. When the test passes the *whole* token is lowercased, prefix and suffix included.
///
/// ## Examples
/// ```rust
/// use forthtalk_core::literals::normalize_hex_token;
///
/// assert_eq!(normalize_hex_token("FF1EA."), "ff1ea.");
/// assert_eq!(normalize_hex_token("$1AE"), "$1ae");
/// assert_eq!(normalize_hex_token("DUP"), "DUP");
/// assert_eq!(normalize_hex_token("D."), "d.");
/// ```
pub fn normalize_hex_token(token: &str) -> Cow<'_, str> {
    let long = token.chars().count() > 1;
    let mut core = token;
    if long {
        core = core.strip_suffix('.').unwrap_or(core);
    }
    if long {
        core = core.strip_prefix('$').unwrap_or(core);
    }

    let all_upper = core.chars().all(|c| c.is_ascii_digit() || matches!(c, 'A'..='F'));
    let all_lower = core.chars().all(|c| c.is_ascii_digit() || matches!(c, 'a'..='f'));

    if (all_upper || all_lower) && token.chars().any(|c| c.is_ascii_uppercase()) {
        Cow::Owned(token.to_ascii_lowercase())
    } else {
        Cow::Borrowed(token)
    }
}

fn is_upper_hex_digit(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, 'A'..='F')
}
