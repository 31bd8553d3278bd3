//! Session configuration
//!
//! Settings come from three places, applied in order:
//! 1. the `FORTHTALK_PATH` environment variable (a platform path list),
//! 2. the startup file (`config.ftk`), uploaded through the host so its `#path` and `#lits` lines apply,
//! 3. command-line flags.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use forthtalk_syntax::{RegisterTable, Warning};

use crate::frontend::SearchPaths;

/// Startup file uploaded before anything else when it exists.
pub const DEFAULT_STARTUP_FILE: &str = "config.ftk";

/// Environment variable holding extra search paths.
pub const PATH_ENV_VAR: &str = "FORTHTALK_PATH";

/// Configuration for one host session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Where source files are looked up
    pub search: SearchPaths,
    /// Register names substituted on upload and stripped for analysis
    pub registers: RegisterTable,
    /// Uploaded at startup if present (`None`: no startup file)
    pub startup_file: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            search: SearchPaths::new(),
            registers: RegisterTable::new(),
            startup_file: Some(PathBuf::from(DEFAULT_STARTUP_FILE)),
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration plus the search paths from `FORTHTALK_PATH`.
    pub fn from_env() -> Self {
        Self::new().with_path_list(env::var_os(PATH_ENV_VAR).as_deref())
    }

    /// Append every directory in a platform path list.
    pub fn with_path_list(mut self, list: Option<&OsStr>) -> Self {
        if let Some(list) = list {
            self.search.extend_from_path_list(list);
        }
        self
    }

    /// Append a search path
    pub fn with_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search.push(dir);
        self
    }

    /// Resolve relative names against `dir`
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search = self.search.with_working_dir(dir);
        self
    }

    /// Use a different startup file, or none
    pub fn with_startup_file(mut self, file: Option<&Path>) -> Self {
        self.startup_file = file.map(Path::to_path_buf);
        self
    }

    /// Add whitespace-separated `name:value` register literals. Malformed pairs and overwrites are returned as
    /// warnings.
    pub fn add_literals(&mut self, pairs: &str) -> Vec<Warning> {
        self.registers.define_pairs(pairs)
    }
}
