//! Dependency resolution for Forth source files
//!
//! Starting from one entry file, every word the file uses is classified against the known words and the
//! symbol index. Words defined in another indexed file pull that file into the worklist, which is analysed in
//! turn until nothing new turns up.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use forthtalk::frontend::resolver::Resolver;
//!
//! let resolution = Resolver::new(&paths, &index, &registers, &mut known).resolve("blink")?;
//! for file in resolution.upload_plan() {
//!     host.upload(file)?;
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use forthtalk_core::lang::defining;
use forthtalk_syntax::{RegisterTable, SourceLine, Warning, scan};
use indexmap::{IndexMap, IndexSet};

use super::errors::ResolveError;
use super::index::SymbolIndex;
use super::known_words::KnownWords;
use super::paths::SearchPaths;

/// A warning raised while analysing one line of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileWarning {
    pub file: PathBuf,
    /// 1-based
    pub line: usize,
    pub warning: Warning,
}

/// The outcome of one resolution run.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    discovery: Vec<PathBuf>,
    unresolved: Vec<String>,
    warnings: Vec<FileWarning>,
}

impl Resolution {
    /// Files in the order they were discovered, entry file first.
    pub fn discovery_order(&self) -> &[PathBuf] {
        &self.discovery
    }

    /// Files in the order they must be uploaded: dependencies first, entry file last.
    pub fn upload_plan(&self) -> Vec<PathBuf> {
        self.discovery.iter().rev().cloned().collect()
    }

    /// Words that are neither known nor indexed, each once, in the order first seen.
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    pub fn warnings(&self) -> &[FileWarning] {
        &self.warnings
    }

    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Files pending analysis, keyed by canonical path so `lib/spi.frt` and `./lib/spi.frt` are one entry.
#[derive(Debug, Default)]
struct Worklist {
    files: IndexMap<PathBuf, PathBuf>,
}

impl Worklist {
    /// Append a file unless it is already listed.
    fn push(&mut self, path: PathBuf) -> bool {
        let key = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        if self.files.contains_key(&key) {
            return false;
        }
        self.files.insert(key, path);
        true
    }

    fn get(&self, cursor: usize) -> Option<&Path> {
        self.files.get_index(cursor).map(|(_, path)| path.as_path())
    }

    fn into_paths(self) -> Vec<PathBuf> {
        self.files.into_values().collect()
    }
}

/// Walks the dependency graph of one entry file.
///
/// The resolver borrows the known words mutably: session definitions are reset at the start of a run and
/// accumulate while it runs, so the baseline cannot change underneath it.
pub struct Resolver<'a> {
    paths: &'a SearchPaths,
    index: &'a SymbolIndex,
    registers: &'a RegisterTable,
    known: &'a mut KnownWords,
}

/// Per-run mutable state.
#[derive(Default)]
struct RunState {
    worklist: Worklist,
    unresolved: IndexSet<String>,
    warnings: Vec<FileWarning>,
}

impl<'a> Resolver<'a> {
    pub fn new(
        paths: &'a SearchPaths,
        index: &'a SymbolIndex,
        registers: &'a RegisterTable,
        known: &'a mut KnownWords,
    ) -> Self {
        Self {
            paths,
            index,
            registers,
            known,
        }
    }

    /// Resolve `entry` and every file it transitively depends on.
    ///
    /// ## Errors
    /// - [`ResolveError::NotFound`] when the entry file cannot be found.
    /// - [`ResolveError::MissingDefinitionFile`] when the index names a file that cannot be found.
    /// - [`ResolveError::Io`] when a found file cannot be read.
    pub fn resolve(&mut self, entry: &str) -> Result<Resolution, ResolveError> {
        let entry_path = self
            .locate(entry)
            .ok_or_else(|| ResolveError::NotFound { name: entry.to_string() })?;

        self.known.reset_session();
        let mut state = RunState::default();
        state.worklist.push(entry_path);

        // The worklist grows while it is walked; the cursor visits every entry exactly once.
        let mut cursor = 0;
        while let Some(path) = state.worklist.get(cursor).map(Path::to_path_buf) {
            cursor += 1;
            tracing::debug!("analysing {}", path.display());
            let source = fs::read_to_string(&path).map_err(|source| ResolveError::Io {
                path: path.clone(),
                source,
            })?;
            self.analyse_source(&path, &source, &mut state)?;
        }

        let resolution = Resolution {
            discovery: state.worklist.into_paths(),
            unresolved: state.unresolved.into_iter().collect(),
            warnings: state.warnings,
        };
        tracing::debug!(
            "resolved {}: {} file(s), {} unresolved word(s)",
            entry,
            resolution.discovery.len(),
            resolution.unresolved.len()
        );
        Ok(resolution)
    }

    fn analyse_source(&mut self, file: &Path, source: &str, state: &mut RunState) -> Result<(), ResolveError> {
        for (number, raw) in source.lines().enumerate() {
            let mut line = SourceLine::new(raw);
            if line.is_command() {
                continue;
            }
            let non_empty = line.sanitize_for_analysis(self.registers);
            for warning in line.take_warnings() {
                tracing::warn!(file = %file.display(), line = number + 1, "{warning}");
                state.warnings.push(FileWarning {
                    file: file.to_path_buf(),
                    line: number + 1,
                    warning,
                });
            }
            if non_empty {
                self.classify_words(line.text(), state)?;
            }
        }
        Ok(())
    }

    /// Classify each word of a sanitized line, left to right.
    fn classify_words(&mut self, text: &str, state: &mut RunState) -> Result<(), ResolveError> {
        let mut pending_definition = false;

        for word in scan::word_tokens(text) {
            if pending_definition {
                self.known.define(word);
                pending_definition = false;
            } else if defining::is_defining_word(word) {
                pending_definition = true;
            } else if self.known.is_known(word) {
                // nothing to do
            } else if let Some(file_name) = self.index.get(word) {
                let path = self
                    .locate(file_name)
                    .ok_or_else(|| ResolveError::MissingDefinitionFile {
                        file: file_name.to_string(),
                        word: word.to_string(),
                    })?;
                if state.worklist.push(path) {
                    tracing::debug!("'{}' pulls in {}", word, file_name);
                }
            } else if state.unresolved.insert(word.to_string()) {
                tracing::debug!("unresolved word '{}'", word);
            }
        }
        Ok(())
    }

    fn locate(&self, name: &str) -> Option<PathBuf> {
        self.paths.find(name).filter(|path| path.is_file())
    }
}

