//! Shareable metadata for `forthtalk_core::lang` registries.
//!
//! The `forthtalk_core::lang` module is a set of **registry-first** vocabularies: defining words and host
//! directives. This submodule provides the small, dependency-free metadata types reused by both.
//!
//! ## Notes
//! - These types are intentionally lightweight and `Copy`-friendly so registries can live in `const` tables.

/// Describe the lifecycle status of a vocabulary item.
///
/// ## Examples
/// ```rust
/// use forthtalk_core::lang::registry::Stability;
///
/// let s = Stability::Stable;
/// assert_eq!(format!("{s:?}"), "Stable");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Deprecated,
}

/// Represent a small example snippet for documentation.
///
/// ## Notes
/// - `code` is the example body, usually a line of Forth or a host directive.
/// - `note` is an optional short explanation.
#[derive(Debug, Clone, Copy)]
pub struct Example {
    pub code: &'static str,
    pub note: Option<&'static str>,
}

/// Shared metadata shape for registry vocabulary items.
///
/// Every item has a stable identity (`id`), accepted spellings (`canonical` + `aliases`) and a one-line
/// `description` used by `--help` style listings.
#[derive(Debug, Clone, Copy)]
pub struct LangItemInfo<Id> {
    pub id: Id,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub stability: Stability,
    pub examples: &'static [Example],
}

impl<Id: Copy + PartialEq> LangItemInfo<Id> {
    /// Check whether `s` is the canonical spelling or one of the aliases.
    pub fn matches(&self, s: &str) -> bool {
        let aliases: &[&str] = self.aliases;
        self.canonical == s || aliases.contains(&s)
    }
}

/// Find the first registry entry whose canonical spelling or alias equals `s`.
///
/// Canonical spellings take priority over aliases across the whole table.
pub fn lookup<Id: Copy + PartialEq>(table: &'static [LangItemInfo<Id>], s: &str) -> Option<Id> {
    if let Some(item) = table.iter().find(|i| i.canonical == s) {
        return Some(item.id);
    }
    table
        .iter()
        .find(|i| {
            let aliases: &[&str] = i.aliases;
            aliases.contains(&s)
        })
        .map(|i| i.id)
}
