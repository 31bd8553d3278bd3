//! File-name resolution against the working directory and the configured search paths.
//!
//! ## Rules
//!
//! 1. A name with no `.` in its last four characters gets the default `.frt` extension.
//! 2. A name with a directory component, or naming a file in the working directory, is used as-is.
//! 3. Otherwise each search path is tried in order and the first existing file wins.
//! 4. No match: `None` (the caller reports "File not found").

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use forthtalk_core::lang::markers;

/// Ordered list of directories searched for Forth source files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPaths {
    /// Directory relative names are looked up in first (`None`: the process working directory)
    working_dir: Option<PathBuf>,
    dirs: Vec<PathBuf>,
}

impl SearchPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative names against `dir` instead of the process working directory.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Append a search directory. Adding a directory twice is a no-op.
    pub fn push(&mut self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        if !self.dirs.contains(&dir) {
            self.dirs.push(dir);
        }
    }

    /// Append every directory in a platform path list (`a:b:c` on Unix).
    pub fn extend_from_path_list(&mut self, list: impl AsRef<OsStr>) {
        for dir in env::split_paths(&list) {
            if !dir.as_os_str().is_empty() {
                self.push(dir);
            }
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// Search directories as they are read from disk (relative ones joined to the working directory).
    pub fn scan_dirs(&self) -> Vec<PathBuf> {
        self.dirs.iter().map(|d| self.in_working_dir(d)).collect()
    }

    /// Find a source file by name.
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        let name = with_default_extension(name);
        let path = Path::new(&name);

        let has_dir = path.parent().is_some_and(|p| !p.as_os_str().is_empty());
        let local = self.in_working_dir(path);
        if has_dir || local.is_file() {
            return Some(local);
        }

        self.scan_dirs()
            .into_iter()
            .map(|dir| dir.join(path))
            .find(|candidate| candidate.is_file())
    }

    fn in_working_dir(&self, path: &Path) -> PathBuf {
        match &self.working_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Append `.frt` unless the name already has a short extension.
///
/// Only the last four characters are checked, so `lib.d/spi` still gets the extension.
pub fn with_default_extension(name: &str) -> String {
    let tail: String = {
        let chars: Vec<char> = name.chars().collect();
        let start = chars.len().saturating_sub(4);
        chars[start..].iter().collect()
    };
    if tail.contains('.') {
        name.to_string()
    } else {
        format!("{name}.{}", markers::SOURCE_EXTENSION)
    }
}
