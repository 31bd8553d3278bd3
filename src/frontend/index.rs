//! Symbol index: which file defines which word.
//!
//! Built by scanning every `.frt` file directly inside the search directories for `: name` definitions.
//! Directories are scanned in search order and files in name order; when two files define the same word the
//! file scanned last wins, silently.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use forthtalk_core::lang::markers;
use forthtalk_syntax::{SourceLine, Warning};

/// Mapping from word name to the base file name that defines it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolIndex {
    words: HashMap<String, String>,
}

/// The outcome of rebuilding the index.
#[derive(Debug, Default)]
pub struct IndexBuild {
    pub index: SymbolIndex,
    /// Files that were scanned, in scan order
    pub files: Vec<PathBuf>,
    /// Per-line warnings, tagged with their file
    pub warnings: Vec<(PathBuf, Warning)>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan every source file in `dirs` and build a fresh index.
    ///
    /// Unreadable directories and files are logged and skipped.
    pub fn build<P: AsRef<Path>>(dirs: &[P]) -> IndexBuild {
        let mut build = IndexBuild::default();

        for dir in dirs {
            let dir = dir.as_ref();
            for file in source_files(dir) {
                let source = match fs::read_to_string(&file) {
                    Ok(s) => s,
                    Err(e) => {
                        tracing::warn!("cannot read {}: {}", file.display(), e);
                        continue;
                    }
                };
                let name = file
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                for warning in build.index.scan_source(&name, &source) {
                    tracing::warn!(file = %file.display(), "{warning}");
                    build.warnings.push((file.clone(), warning));
                }
                build.files.push(file);
            }
        }

        tracing::debug!(
            "indexed {} word(s) from {} file(s)",
            build.index.len(),
            build.files.len()
        );
        build
    }

    /// Record every word defined in `source` as belonging to `file_name`.
    pub fn scan_source(&mut self, file_name: &str, source: &str) -> Vec<Warning> {
        let mut warnings = Vec::new();

        for raw in source.lines() {
            let mut line = SourceLine::new(raw);
            if line.is_command() {
                continue;
            }
            let non_empty = line.strip_comments();
            warnings.extend(line.take_warnings());
            if !non_empty {
                continue;
            }

            let tokens: Vec<&str> = line.text().split_whitespace().collect();
            for (i, token) in tokens.iter().enumerate() {
                if *token != markers::COLON {
                    continue;
                }
                match tokens.get(i + 1) {
                    Some(word) => {
                        self.insert(*word, file_name);
                    }
                    None => warnings.push(Warning::MalformedDefinition {
                        line: raw.to_string(),
                    }),
                }
            }
        }

        warnings
    }

    /// Record a definition, returning the file previously recorded for the word.
    pub fn insert(&mut self, word: impl Into<String>, file_name: impl Into<String>) -> Option<String> {
        self.words.insert(word.into(), file_name.into())
    }

    /// The base file name that defines `word`.
    pub fn get(&self, word: &str) -> Option<&str> {
        self.words.get(word).map(String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// `(word, file)` pairs sorted by word.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .words
            .iter()
            .map(|(w, f)| (w.as_str(), f.as_str()))
            .collect();
        pairs.sort_unstable();
        pairs
    }
}

/// Regular `.frt` files directly inside `dir`, sorted by name.
fn source_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("cannot read search path {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let suffix = format!(".{}", markers::SOURCE_EXTENSION);
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(&suffix))
        })
        .collect();
    files.sort();
    files
}
