//! Define the built-in defining words recognized by the dependency resolver.
//!
//! A *defining word* introduces a new word: the token that follows it is the name being defined. Besides the
//! fixed names in [`DEFINING_WORDS`], any token ending in `:` (including `:` itself) is a defining word.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**; the target dictionary is lowercase.
//!
//! ## Examples
//! ```rust
//! use forthtalk_core::lang::defining::{self, DefiningWordId};
//!
//! assert_eq!(defining::from_str("2variable"), Some(DefiningWordId::TwoVariable));
//! assert!(defining::is_defining_word(":"));
//! assert!(defining::is_defining_word("task:"));
//! assert!(!defining::is_defining_word("dup"));
//! ```

use super::registry::{self, Example, LangItemInfo, Stability};

/// Stable identifier for every fixed defining word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefiningWordId {
    Constant,
    Variable,
    Value,
    TwoConstant,
    TwoVariable,
}

/// Metadata for a defining word.
pub type DefiningWordInfo = LangItemInfo<DefiningWordId>;

/// Registry of the fixed defining words.
pub const DEFINING_WORDS: &[DefiningWordInfo] = &[
    info(
        DefiningWordId::Constant,
        "constant",
        "Define a named single-cell constant",
        &[Example {
            code: "10 constant ten",
            note: None,
        }],
    ),
    info(
        DefiningWordId::Variable,
        "variable",
        "Define a named single-cell variable",
        &[Example {
            code: "variable counter",
            note: None,
        }],
    ),
    info(DefiningWordId::Value, "value", "Define a named value", &[]),
    info(
        DefiningWordId::TwoConstant,
        "2constant",
        "Define a named double-cell constant",
        &[],
    ),
    info(
        DefiningWordId::TwoVariable,
        "2variable",
        "Define a named double-cell variable",
        &[],
    ),
];

/// Canonical spelling.
pub fn as_str(id: DefiningWordId) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: DefiningWordId) -> &'static DefiningWordInfo {
    DEFINING_WORDS
        .iter()
        .find(|d| d.id == id)
        .expect("defining word info missing")
}

/// Lookup by spelling.
pub fn from_str(s: &str) -> Option<DefiningWordId> {
    registry::lookup(DEFINING_WORDS, s)
}

/// Check whether a token introduces a definition.
///
/// ## Returns
/// - `true` for the fixed names in [`DEFINING_WORDS`] and for every token ending in `:`.
pub fn is_defining_word(token: &str) -> bool {
    token.ends_with(':') || from_str(token).is_some()
}

const fn info(
    id: DefiningWordId,
    canonical: &'static str,
    description: &'static str,
    examples: &'static [Example],
) -> DefiningWordInfo {
    LangItemInfo {
        id,
        canonical,
        aliases: &[],
        description,
        stability: Stability::Stable,
        examples,
    }
}
