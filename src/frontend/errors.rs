//! Errors that abort a resolution run.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ResolveError {
    /// The entry file (or a file named in a directive) is not on any search path.
    #[error("File not found: {name}")]
    #[diagnostic(
        code(forthtalk::file_not_found),
        help("add the directory with `#path DIR`, `--path DIR` or FORTHTALK_PATH")
    )]
    NotFound { name: String },

    /// The symbol index names a file that is no longer on the search paths.
    #[error("File not found: {file} (indexed as defining '{word}')")]
    #[diagnostic(
        code(forthtalk::stale_index),
        help("rebuild the index with `#defs` after moving or deleting source files")
    )]
    MissingDefinitionFile { file: String, word: String },

    #[error("Error reading '{}': {source}", .path.display())]
    #[diagnostic(code(forthtalk::io))]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ResolveError {
    /// The file name the error is about.
    pub fn file(&self) -> String {
        match self {
            ResolveError::NotFound { name } => name.clone(),
            ResolveError::MissingDefinitionFile { file, .. } => file.clone(),
            ResolveError::Io { path, .. } => path.display().to_string(),
        }
    }
}
