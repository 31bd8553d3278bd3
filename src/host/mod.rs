//! The host session
//!
//! A [`Host`] owns everything one session needs: the configuration (search paths, register literals), the
//! symbol index, the target's known words and a [`Transport`]. Directives, whether typed on the command line
//! or found inside an uploaded file, are parsed into a [`Directive`] and dispatched by id.
//!
//! ## Upload pipeline
//!
//! For each line of a file:
//! 1. command lines are run as directives (so `#require`, `#path` and `#lits` work inside files),
//! 2. other lines are comment-stripped and skipped when empty,
//! 3. register names are replaced by their literals and hex literals are lowercased,
//! 4. the line is sent.

pub mod directive;
pub mod transport;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use forthtalk_core::lang::directives::{self, DirectiveId};
use forthtalk_core::lang::markers;
use forthtalk_syntax::SourceLine;
use thiserror::Error;

use crate::config::SessionConfig;
use crate::frontend::{KnownWords, Resolution, ResolveError, Resolver, SymbolIndex};

pub use directive::{Directive, DirectiveError};
pub use transport::{LineTransport, Transport};

#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Directive(#[from] DirectiveError),

    #[error("Error executing command: {directive} - {message}")]
    InvalidArgument {
        directive: &'static str,
        message: String,
    },

    #[error("{} is already being uploaded", .path.display())]
    RecursiveUpload { path: PathBuf },

    #[error("Error accessing '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("transport error: {0}")]
    Transport(#[source] io::Error),
}

/// Which view of the target's words `#words` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordsView {
    /// Fetch from the target, then list
    Get,
    /// Latest first
    List,
    /// Words before `marker`
    User,
    Alpha,
}

impl WordsView {
    /// Only the first letter of the argument counts (`l`, `list` and `lst` are the same).
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg.chars().next() {
            None | Some('g') => Some(WordsView::Get),
            Some('l') => Some(WordsView::List),
            Some('u') => Some(WordsView::User),
            Some('a') => Some(WordsView::Alpha),
            Some(_) => None,
        }
    }
}

/// One file sent to the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file: PathBuf,
    pub lines_sent: usize,
}

/// A resolved file and the uploads of its plan.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub resolution: Resolution,
    pub uploads: Vec<Upload>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexRewrite {
    pub file: PathBuf,
    pub changed_lines: usize,
    /// `false` in check mode or when nothing changed
    pub written: bool,
}

/// What a directive did, for the caller to report.
#[derive(Debug, Clone)]
pub enum Outcome {
    Done,
    Uploaded(Upload),
    Compiled(Compilation),
    Plan(Resolution),
    Indexed { words: usize },
    Literals { warnings: usize },
    Paths(Vec<PathBuf>),
    Words(Vec<String>),
    Found(Vec<(String, bool)>),
    Emptied(usize),
    HexRewritten(HexRewrite),
}

pub struct Host<T: Transport> {
    config: SessionConfig,
    index: SymbolIndex,
    index_built: bool,
    known: KnownWords,
    transport: T,
    /// Files currently being uploaded, outermost first
    uploading: Vec<PathBuf>,
}

impl<T: Transport> Host<T> {
    pub fn new(config: SessionConfig, transport: T) -> Self {
        Self {
            config,
            index: SymbolIndex::new(),
            index_built: false,
            known: KnownWords::new(),
            transport,
            uploading: Vec::new(),
        }
    }

    pub fn with_known_words(mut self, known: KnownWords) -> Self {
        self.known = known;
        self
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SessionConfig {
        &mut self.config
    }

    pub fn index(&self) -> &SymbolIndex {
        &self.index
    }

    pub fn known_words(&self) -> &KnownWords {
        &self.known
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Upload the startup file if it exists.
    pub fn start(&mut self) -> Result<Option<Upload>, HostError> {
        let Some(file) = self.config.startup_file.clone() else {
            return Ok(None);
        };
        let Some(path) = self.config.search.find(&file.to_string_lossy()).filter(|p| p.is_file()) else {
            tracing::debug!("no startup file {}", file.display());
            return Ok(None);
        };
        tracing::info!("running startup file {}", path.display());
        self.upload_path(&path).map(Some)
    }

    // ========================================================================
    // Directives
    // ========================================================================

    /// Parse and run one command line.
    pub fn run_command(&mut self, line: &str) -> Result<Outcome, HostError> {
        let directive = Directive::parse(line)?;
        self.execute(&directive)
    }

    pub fn execute(&mut self, directive: &Directive) -> Result<Outcome, HostError> {
        match directive.id {
            DirectiveId::Send => {
                let name = file_argument(directive)?;
                Ok(Outcome::Uploaded(self.upload_file(name)?))
            }
            DirectiveId::Comp => {
                let name = file_argument(directive)?;
                Ok(Outcome::Compiled(self.compile_file(name)?))
            }
            DirectiveId::File => {
                let name = file_argument(directive)?;
                Ok(Outcome::Plan(self.analyse_file(name)?))
            }
            DirectiveId::Defs => {
                let words = self.find_definitions().len();
                Ok(Outcome::Indexed { words })
            }
            DirectiveId::Lits => {
                if !directive.has_args() {
                    return Err(invalid(directive, "No literal definitions provided"));
                }
                let warnings = self.config.add_literals(&directive.args).len();
                Ok(Outcome::Literals { warnings })
            }
            DirectiveId::Path => {
                if !directive.has_args() {
                    return Ok(Outcome::Paths(self.config.search.dirs().to_vec()));
                }
                self.config.search.push(directive.args.as_str());
                Ok(Outcome::Done)
            }
            DirectiveId::Warm => {
                tracing::info!("Warm start...");
                self.send(markers::WARM_START)?;
                Ok(Outcome::Done)
            }
            DirectiveId::Empty => Ok(Outcome::Emptied(self.empty()?)),
            DirectiveId::List => Ok(Outcome::Words(self.words(WordsView::List)?)),
            DirectiveId::Words => {
                let view = WordsView::from_arg(&directive.args)
                    .ok_or_else(|| invalid(directive, "expected get, list, user or alpha"))?;
                Ok(Outcome::Words(self.words(view)?))
            }
            DirectiveId::Find => {
                if !directive.has_args() {
                    return Err(invalid(directive, "No words to find"));
                }
                Ok(Outcome::Found(self.find_words(directive.arg_words())))
            }
            DirectiveId::Hex => {
                let name = file_argument(directive)?;
                Ok(Outcome::HexRewritten(self.hex_rewrite(name, false)?))
            }
        }
    }

    // ========================================================================
    // Uploading and resolving
    // ========================================================================

    /// Find `name` on the search paths and upload it.
    pub fn upload_file(&mut self, name: &str) -> Result<Upload, HostError> {
        let path = self.locate(name)?;
        self.upload_path(&path)
    }

    /// Upload a file that has already been located.
    ///
    /// A file that (directly or through nested `#send` lines) asks to upload itself is rejected.
    pub fn upload_path(&mut self, path: &Path) -> Result<Upload, HostError> {
        let key = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if self.uploading.contains(&key) {
            return Err(HostError::RecursiveUpload {
                path: path.to_path_buf(),
            });
        }

        self.uploading.push(key);
        let result = self.send_source(path);
        self.uploading.pop();
        result
    }

    fn send_source(&mut self, path: &Path) -> Result<Upload, HostError> {
        let source = fs::read_to_string(path).map_err(|source| HostError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("===> Reading file: {}", path.display());

        let mut lines_sent = 0;
        for (number, raw) in source.lines().enumerate() {
            let mut line = SourceLine::new(raw);

            if line.is_command() {
                tracing::debug!("command: {}", line.text());
                match self.run_command(line.text()) {
                    Ok(_) => {}
                    Err(e @ HostError::Transport(_)) => return Err(e),
                    Err(e) => tracing::warn!(file = %path.display(), line = number + 1, "{e}"),
                }
                continue;
            }

            let non_empty = line.sanitize_for_upload(&self.config.registers);
            for warning in line.take_warnings() {
                tracing::warn!(file = %path.display(), line = number + 1, "{warning}");
            }
            if non_empty {
                self.send(line.text())?;
                lines_sent += 1;
            }
        }

        tracing::info!("===> Finished reading file: {}", path.display());
        Ok(Upload {
            file: path.to_path_buf(),
            lines_sent,
        })
    }

    /// Resolve `name`, then upload every file of its plan, dependencies first.
    ///
    /// Unresolved words are reported but do not stop the upload.
    pub fn compile_file(&mut self, name: &str) -> Result<Compilation, HostError> {
        let resolution = self.analyse_file(name)?;
        let mut uploads = Vec::new();
        for path in resolution.upload_plan() {
            uploads.push(self.upload_path(&path)?);
        }
        Ok(Compilation { resolution, uploads })
    }

    /// Resolve `name` and report the files it needs.
    ///
    /// The symbol index is built on first use.
    pub fn analyse_file(&mut self, name: &str) -> Result<Resolution, HostError> {
        if !self.index_built {
            self.find_definitions();
        }

        let resolution = Resolver::new(
            &self.config.search,
            &self.index,
            &self.config.registers,
            &mut self.known,
        )
        .resolve(name)?;

        if !resolution.is_complete() {
            tracing::warn!(
                "No definitions found for the following words: {}",
                resolution.unresolved().join(" ")
            );
        }
        tracing::info!("Compile files: {}", display_paths(resolution.discovery_order()));
        Ok(resolution)
    }

    /// Rebuild the symbol index from the search paths.
    pub fn find_definitions(&mut self) -> &SymbolIndex {
        let build = SymbolIndex::build(&self.config.search.scan_dirs());
        tracing::info!(
            "found {} definition(s) in {} file(s)",
            build.index.len(),
            build.files.len()
        );
        self.index = build.index;
        self.index_built = true;
        &self.index
    }

    /// Lowercase upper case hex literals in a file, in place.
    ///
    /// Command lines are left alone so file names in directives keep their case. With `check` set nothing is
    /// written; the result still says how many lines would change.
    pub fn hex_rewrite(&mut self, name: &str, check: bool) -> Result<HexRewrite, HostError> {
        let path = self.locate(name)?;
        let source = fs::read_to_string(&path).map_err(|source| HostError::Io {
            path: path.clone(),
            source,
        })?;

        let (rewritten, changed_lines) = rewrite_hex(&source);
        let written = changed_lines > 0 && !check;
        if written {
            fs::write(&path, rewritten).map_err(|source| HostError::Io {
                path: path.clone(),
                source,
            })?;
            tracing::info!("hex conversion on {}: {} line(s) changed", path.display(), changed_lines);
        }

        Ok(HexRewrite {
            file: path,
            changed_lines,
            written,
        })
    }

    // ========================================================================
    // Known words
    // ========================================================================

    /// Replace the baseline with the target's `words` listing, if the transport can read it.
    ///
    /// ## Returns
    /// - `false` when no listing was received; the old baseline is kept.
    pub fn fetch_words(&mut self) -> Result<bool, HostError> {
        match self.transport.fetch_words().map_err(HostError::Transport)? {
            Some(listing) => {
                self.known = KnownWords::from_listing(&listing);
                tracing::info!(
                    "Words received... {} user defined words",
                    self.known.user_words().len()
                );
                Ok(true)
            }
            None => {
                tracing::warn!("Words not received");
                Ok(false)
            }
        }
    }

    pub fn words(&mut self, view: WordsView) -> Result<Vec<String>, HostError> {
        if view == WordsView::Get {
            self.fetch_words()?;
        }
        let words = match view {
            WordsView::Get | WordsView::List => self.known.baseline().to_vec(),
            WordsView::User => self.known.user_words().to_vec(),
            WordsView::Alpha => self.known.sorted().into_iter().map(str::to_string).collect(),
        };
        Ok(words)
    }

    /// Send `empty` and forget the user words.
    pub fn empty(&mut self) -> Result<usize, HostError> {
        self.send(markers::EMPTY_WORD)?;
        let dropped = self.known.empty();
        tracing::info!("Defined words back to 'marker' removed");
        Ok(dropped)
    }

    /// Report, for each word, whether the target knows it.
    pub fn find_words<'w>(&self, words: impl IntoIterator<Item = &'w str>) -> Vec<(String, bool)> {
        words
            .into_iter()
            .map(|w| (w.to_string(), self.known.contains_baseline(w)))
            .collect()
    }

    fn send(&mut self, line: &str) -> Result<(), HostError> {
        self.transport.send_line(line).map_err(HostError::Transport)
    }

    fn locate(&self, name: &str) -> Result<PathBuf, HostError> {
        self.config
            .search
            .find(name)
            .filter(|p| p.is_file())
            .ok_or_else(|| ResolveError::NotFound { name: name.to_string() }.into())
    }
}

/// Lowercase hex literals on every Forth line, keeping line endings and command lines byte for byte.
///
/// ## Returns
/// - the new text and how many lines changed.
pub fn rewrite_hex(source: &str) -> (String, usize) {
    let mut out = String::with_capacity(source.len());
    let mut changed = 0;

    for chunk in source.split_inclusive('\n') {
        let body = chunk.trim_end_matches(['\n', '\r']);
        let ending = &chunk[body.len()..];

        let mut line = SourceLine::new(body);
        if line.is_command() || line.is_empty() {
            out.push_str(chunk);
            continue;
        }
        line.normalize_hex();
        if line.text() != body {
            changed += 1;
        }
        out.push_str(line.text());
        out.push_str(ending);
    }

    (out, changed)
}

fn file_argument(directive: &Directive) -> Result<&str, HostError> {
    if directive.has_args() {
        Ok(directive.args.as_str())
    } else {
        Err(invalid(directive, "missing file name"))
    }
}

fn invalid(directive: &Directive, message: &str) -> HostError {
    HostError::InvalidArgument {
        directive: directives::as_str(directive.id),
        message: message.to_string(),
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted {
        sent: Vec<String>,
        listing: Option<String>,
    }

    impl Transport for Scripted {
        fn send_line(&mut self, line: &str) -> io::Result<()> {
            self.sent.push(line.to_string());
            Ok(())
        }

        fn fetch_words(&mut self) -> io::Result<Option<String>> {
            Ok(self.listing.clone())
        }
    }

    fn host(listing: Option<&str>) -> Host<Scripted> {
        let transport = Scripted {
            sent: Vec::new(),
            listing: listing.map(str::to_string),
        };
        Host::new(SessionConfig::new().with_startup_file(None), transport)
    }

    #[test]
    fn test_words_view_from_first_letter() {
        assert_eq!(WordsView::from_arg(""), Some(WordsView::Get));
        assert_eq!(WordsView::from_arg("lst"), Some(WordsView::List));
        assert_eq!(WordsView::from_arg("user"), Some(WordsView::User));
        assert_eq!(WordsView::from_arg("a"), Some(WordsView::Alpha));
        assert_eq!(WordsView::from_arg("x"), None);
    }

    #[test]
    fn test_words_get_replaces_baseline() {
        let mut host = host(Some("blink marker dup drop"));
        let Outcome::Words(words) = host.run_command("#words user").unwrap() else {
            panic!("expected words");
        };
        assert!(words.is_empty());

        host.run_command("#words").unwrap();
        let Outcome::Words(words) = host.run_command("#words u").unwrap() else {
            panic!("expected words");
        };
        assert_eq!(words, vec!["blink"]);
    }

    #[test]
    fn test_words_not_received_keeps_baseline() {
        let mut host = host(None).with_known_words(KnownWords::from_listing("dup"));
        assert!(!host.fetch_words().unwrap());
        assert!(host.known_words().contains_baseline("dup"));
    }

    #[test]
    fn test_empty_sends_word_and_drops_user_words() {
        let mut host = host(None).with_known_words(KnownWords::from_listing("blink marker dup"));
        let Outcome::Emptied(n) = host.run_command("#empty").unwrap() else {
            panic!("expected emptied");
        };
        assert_eq!(n, 1);
        assert_eq!(host.transport().sent, vec!["empty"]);
        assert_eq!(host.find_words(["blink", "dup"]), vec![
            ("blink".to_string(), false),
            ("dup".to_string(), true)
        ]);
    }

    #[test]
    fn test_warm_sends_ctrl_o() {
        let mut host = host(None);
        host.run_command("#warm").unwrap();
        assert_eq!(host.transport().sent, vec!["\u{0f}"]);
    }

    #[test]
    fn test_path_without_args_lists_paths() {
        let mut host = host(None);
        host.run_command("#path lib").unwrap();
        host.run_command("#path drivers").unwrap();
        let Outcome::Paths(paths) = host.run_command("#path").unwrap() else {
            panic!("expected paths");
        };
        assert_eq!(paths, vec![PathBuf::from("lib"), PathBuf::from("drivers")]);
    }

    #[test]
    fn test_argument_errors() {
        let mut host = host(None);
        for (line, message) in [
            ("#lits", "Error executing command: #lits - No literal definitions provided"),
            ("#find", "Error executing command: #find - No words to find"),
            ("#send", "Error executing command: #send - missing file name"),
            ("#words zzz", "Error executing command: #words - expected get, list, user or alpha"),
        ] {
            assert_eq!(host.run_command(line).unwrap_err().to_string(), message);
        }
        assert!(matches!(
            host.run_command("#last"),
            Err(HostError::Directive(DirectiveError::UnknownDirective { .. }))
        ));
    }

    #[test]
    fn test_lits_extend_registers() {
        let mut host = host(None);
        let Outcome::Literals { warnings } = host.run_command("#lits LED:$20 bad").unwrap() else {
            panic!("expected literals");
        };
        assert_eq!(warnings, 1);
        assert_eq!(host.config().registers.get("LED"), Some("$20"));
    }

    #[test]
    fn test_rewrite_hex_keeps_commands_and_line_endings() {
        let source = "#send SPI\r\n$FF PORTB c!\r\n\n  dup ABC.\n";
        let (out, changed) = rewrite_hex(source);
        assert_eq!(out, "#send SPI\r\n$ff PORTB c!\r\n\n  dup abc.\n");
        assert_eq!(changed, 2);
    }
}
