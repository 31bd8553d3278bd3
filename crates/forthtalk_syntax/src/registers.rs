//! Device register table: named constants substituted with their literal value before upload.
//!
//! The table starts empty and is filled from configuration (`#lits NAME:VALUE ...`). It is an explicit value
//! owned by the session, so independent sessions (and tests) never share registers.

use std::collections::BTreeMap;

use crate::diagnostics::Warning;

/// How register names are treated by [`crate::line::SourceLine::substitute_registers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterMode {
    /// Replace the name with its literal (upload).
    Substitute,
    /// Drop the name (analysis: it would only be a literal afterwards).
    Strip,
}

/// Mapping from register name to literal text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterTable {
    entries: BTreeMap<String, String>,
}

impl RegisterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the literal for a register name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, literal)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Define or redefine a register.
    ///
    /// ## Returns
    /// - `Some(Warning::RegisterOverwritten)` when an existing name gets a different value.
    pub fn define(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<Warning> {
        let name = name.into();
        let value = value.into();
        let warning = match self.entries.get(&name) {
            Some(old) if *old != value => Some(Warning::RegisterOverwritten {
                name: name.clone(),
                old: old.clone(),
                new: value.clone(),
            }),
            _ => None,
        };
        if let Some(w) = &warning {
            tracing::warn!("{w}");
        }
        self.entries.insert(name, value);
        warning
    }

    /// Define every whitespace-separated `name:value` pair in `args`.
    ///
    /// Pairs that are not exactly `name:value` are skipped with a warning; the rest are still applied.
    pub fn define_pairs(&mut self, args: &str) -> Vec<Warning> {
        let mut warnings = Vec::new();
        for pair in args.split_whitespace() {
            let mut parts = pair.split(':');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(name), Some(value), None) => warnings.extend(self.define(name, value)),
                _ => {
                    let w = Warning::MalformedLiteral { pair: pair.to_string() };
                    tracing::warn!("{w}");
                    warnings.push(w);
                }
            }
        }
        warnings
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RegisterTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = RegisterTable::new();
        for (k, v) in iter {
            table.entries.insert(k.into(), v.into());
        }
        table
    }
}
