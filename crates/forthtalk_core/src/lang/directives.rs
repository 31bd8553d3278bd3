//! Host directive vocabulary.
//!
//! Lines starting with `#` (or `\ #`) are not Forth: they are directives for the host tool. This module is the
//! fixed mapping from directive spelling to [`DirectiveId`]; the host dispatches on the id.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive** and includes the leading `#`.
//! - `#include` and `#require` are aliases of `#send`.
//!
//! ## Examples
//! ```rust
//! use forthtalk_core::lang::directives::{self, DirectiveId};
//!
//! assert_eq!(directives::from_str("#require"), Some(DirectiveId::Send));
//! assert_eq!(directives::as_str(DirectiveId::Send), "#send");
//! assert_eq!(directives::from_str("#nope"), None);
//! ```

use super::registry::{self, Example, LangItemInfo, Stability};

/// Stable identifier for every host directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveId {
    Send,
    Comp,
    File,
    Defs,
    Lits,
    Path,
    Warm,
    Empty,
    List,
    Words,
    Find,
    Hex,
}

/// Metadata for a directive.
pub type DirectiveInfo = LangItemInfo<DirectiveId>;

/// Registry of all host directives.
pub const DIRECTIVES: &[DirectiveInfo] = &[
    info(
        DirectiveId::Send,
        "#send",
        &["#include", "#require"],
        "Upload a file to the target",
        &[Example {
            code: "#require spi",
            note: Some("The .frt extension is implied."),
        }],
    ),
    info(
        DirectiveId::Comp,
        "#comp",
        &[],
        "Resolve the files a file depends on and upload them in order",
        &[],
    ),
    info(
        DirectiveId::File,
        "#file",
        &[],
        "Resolve the files a file depends on and report the plan",
        &[],
    ),
    info(
        DirectiveId::Defs,
        "#defs",
        &[],
        "Rebuild the word definition index from the search paths",
        &[],
    ),
    info(
        DirectiveId::Lits,
        "#lits",
        &[],
        "Add register literals as name:value pairs",
        &[Example {
            code: "#lits SPI_MOSI:$3 SPI_SCK:$5",
            note: None,
        }],
    ),
    info(
        DirectiveId::Path,
        "#path",
        &[],
        "Add a search path, or list the search paths",
        &[],
    ),
    info(DirectiveId::Warm, "#warm", &[], "Warm start the target", &[]),
    info(
        DirectiveId::Empty,
        "#empty",
        &[],
        "Forget user words on the target back to marker",
        &[],
    ),
    info(DirectiveId::List, "#list", &[], "Shorthand for #words list", &[]),
    info(
        DirectiveId::Words,
        "#words",
        &[],
        "Fetch or print the target's words (get, list, user, alpha)",
        &[],
    ),
    info(
        DirectiveId::Find,
        "#find",
        &[],
        "Report whether words are known to the target",
        &[],
    ),
    info(
        DirectiveId::Hex,
        "#hex",
        &[],
        "Rewrite a file with upper case hex literals lowercased",
        &[],
    ),
];

/// Canonical spelling.
pub fn as_str(id: DirectiveId) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: DirectiveId) -> &'static DirectiveInfo {
    DIRECTIVES
        .iter()
        .find(|d| d.id == id)
        .expect("directive info missing")
}

/// Lookup by spelling (canonical or alias).
pub fn from_str(s: &str) -> Option<DirectiveId> {
    registry::lookup(DIRECTIVES, s)
}

const fn info(
    id: DirectiveId,
    canonical: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
    examples: &'static [Example],
) -> DirectiveInfo {
    LangItemInfo {
        id,
        canonical,
        aliases,
        description,
        stability: Stability::Stable,
        examples,
    }
}
