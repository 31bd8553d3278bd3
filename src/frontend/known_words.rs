//! Words the target already understands.
//!
//! The baseline is the target's dictionary as printed by `words`: most recent first, user words before the
//! `marker` sentinel and system words after it. Session words are the ones a resolution run discovers as
//! locally defined; they are cleared at the start of every run.

use std::collections::HashSet;

use forthtalk_core::lang::{defining, markers};
use indexmap::IndexSet;

#[derive(Debug, Clone, Default)]
pub struct KnownWords {
    /// Dictionary order, most recent first
    baseline: Vec<String>,
    baseline_set: HashSet<String>,
    session: IndexSet<String>,
}

impl KnownWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `words` dump. Tokens are whitespace separated and may span any number of lines.
    pub fn from_listing(text: &str) -> Self {
        let mut known = Self::new();
        known.set_baseline(text.split_whitespace().map(str::to_string));
        known
    }

    /// Replace the baseline. Only call this between resolution runs.
    pub fn set_baseline<I>(&mut self, words: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.baseline = words.into_iter().collect();
        self.baseline_set = self.baseline.iter().cloned().collect();
    }

    pub fn baseline(&self) -> &[String] {
        &self.baseline
    }

    pub fn contains_baseline(&self, word: &str) -> bool {
        self.baseline_set.contains(word)
    }

    /// Words defined on the target after `marker`, most recent first.
    ///
    /// Without a marker there is no way to tell user words apart, so nothing is returned.
    pub fn user_words(&self) -> &[String] {
        match self.marker_position() {
            Some(end) => &self.baseline[..end],
            None => &[],
        }
    }

    /// Forget the user words, as the target does when sent `empty`. `marker` itself is kept.
    ///
    /// ## Returns
    /// - how many words were dropped (zero when there is no marker).
    pub fn empty(&mut self) -> usize {
        let Some(end) = self.marker_position() else {
            return 0;
        };
        let kept: Vec<String> = self.baseline.drain(end..).collect();
        let dropped = self.baseline.len();
        self.set_baseline(kept);
        dropped
    }

    /// The baseline in alphabetical order.
    pub fn sorted(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.baseline.iter().map(String::as_str).collect();
        words.sort_unstable();
        words
    }

    /// Check whether a word is in the baseline, was defined this session, or is a defining word.
    pub fn is_known(&self, word: &str) -> bool {
        self.baseline_set.contains(word) || self.session.contains(word) || defining::is_defining_word(word)
    }

    /// Record a word defined by a file analysed in the current run.
    ///
    /// ## Returns
    /// - `true` when the word was not already recorded for this session.
    pub fn define(&mut self, word: &str) -> bool {
        self.session.insert(word.to_string())
    }

    /// Words defined during the current run, in discovery order.
    pub fn session_defined(&self) -> impl Iterator<Item = &str> {
        self.session.iter().map(String::as_str)
    }

    pub fn reset_session(&mut self) {
        self.session.clear();
    }

    fn marker_position(&self) -> Option<usize> {
        self.baseline.iter().position(|w| w == markers::MARKER_WORD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "blink led-on marker\np2+ pc@ dup drop +";

    #[test]
    fn test_user_words_are_before_marker() {
        let known = KnownWords::from_listing(LISTING);
        assert_eq!(known.user_words(), &["blink", "led-on"]);
        assert!(known.contains_baseline("dup"));
    }

    #[test]
    fn test_empty_drops_user_words() {
        let mut known = KnownWords::from_listing(LISTING);
        assert_eq!(known.empty(), 2);
        assert_eq!(known.baseline()[0], "marker");
        assert!(!known.is_known("blink"));
        assert!(known.is_known("dup"));
    }

    #[test]
    fn test_empty_without_marker_is_noop() {
        let mut known = KnownWords::from_listing("dup drop");
        assert!(known.user_words().is_empty());
        assert_eq!(known.empty(), 0);
        assert_eq!(known.baseline().len(), 2);
    }

    #[test]
    fn test_known_includes_session_and_defining_words() {
        let mut known = KnownWords::new();
        assert!(known.is_known("constant"));
        assert!(known.is_known("name:"));
        assert!(!known.is_known("spi!"));

        assert!(known.define("spi!"));
        assert!(!known.define("spi!"));
        assert!(known.is_known("spi!"));

        known.reset_session();
        assert!(!known.is_known("spi!"));
    }

    #[test]
    fn test_sorted() {
        let known = KnownWords::from_listing("drop dup + marker");
        assert_eq!(known.sorted(), vec!["+", "drop", "dup", "marker"]);
    }
}
