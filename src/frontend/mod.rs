//! forthtalk frontend
//!
//! This module contains everything that reads Forth source from disk:
//! - `paths`: file-name lookup over the working directory and search paths
//! - `index`: the word → defining file index
//! - `known_words`: the target's dictionary plus words defined during a run
//! - `resolver`: the dependency worklist that turns one file into an upload plan
//! - `errors`: failures that abort a resolution run

// Line-local sanitizing is provided by the shared forthtalk_syntax crate.
pub use forthtalk_syntax::{diagnostics, line, registers, scan};

pub mod errors;
pub mod index;
pub mod known_words;
pub mod paths;
pub mod resolver;

pub use errors::ResolveError;
pub use index::{IndexBuild, SymbolIndex};
pub use known_words::KnownWords;
pub use paths::SearchPaths;
pub use resolver::{FileWarning, Resolution, Resolver};
