//! CLI module for forthtalk
//!
//! This module provides the command-line interface to the host session.
//!
//! ## Commands
//!
//! - `resolve <file>` - Report the files a file needs, in upload order
//! - `defs` - Rebuild and print the symbol index
//! - `send <file>` - Upload one file
//! - `comp <file>` - Resolve a file and upload its whole plan
//! - `hex <file>` - Lowercase upper case hex literals in place
//! - `words` / `find` - Query the target's known words
//! - `sanitize <file>` - Print a file as it would be sent (or analysed)
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use crate::host::HostError;
use crate::version::FORTHTALK_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<HostError> for CliError {
    fn from(err: HostError) -> Self {
        match err {
            // Resolution failures carry a code and a hint; let miette lay them out.
            HostError::Resolve(e) => CliError::failure(format!("{:?}", miette::Report::new(e))),
            other => CliError::failure(other.to_string()),
        }
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Upload Forth source to a target, sending the files it depends on first
#[derive(Parser, Debug)]
#[command(name = "forthtalk")]
#[command(version = FORTHTALK_VERSION)]
#[command(about = "Upload Forth source, resolving the files it depends on", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub session: SessionArgs,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct SessionArgs {
    /// Add a search path (repeatable; searched after FORTHTALK_PATH and the startup file's paths)
    #[arg(short = 'p', long = "path", value_name = "DIR", global = true)]
    pub paths: Vec<PathBuf>,

    /// Load the target's dictionary from a saved `words` listing
    #[arg(long = "words", value_name = "FILE", global = true)]
    pub words_file: Option<PathBuf>,

    /// Startup file uploaded first when it exists
    #[arg(long = "config", value_name = "FILE", global = true, default_value = crate::config::DEFAULT_STARTUP_FILE)]
    pub config: PathBuf,

    /// Do not run a startup file
    #[arg(long = "no-config", global = true, conflicts_with = "config")]
    pub no_config: bool,

    /// Add a register literal, written NAME:VALUE (repeatable)
    #[arg(long = "lits", value_name = "NAME:VALUE", global = true)]
    pub lits: Vec<String>,

    /// Write the upload stream to a file instead of stdout
    #[arg(short = 'o', long = "out", value_name = "FILE", global = true)]
    pub out: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report the files a file depends on, in upload order
    Resolve {
        /// Entry file (the .frt extension is implied)
        #[arg(value_name = "FILE")]
        file: String,
    },

    /// Rebuild the symbol index from the search paths and print it
    Defs,

    /// Upload one file
    Send {
        #[arg(value_name = "FILE")]
        file: String,
    },

    /// Resolve a file and upload every file it needs, dependencies first
    Comp {
        #[arg(value_name = "FILE")]
        file: String,
    },

    /// Lowercase upper case hex literals in a file
    Hex {
        #[arg(value_name = "FILE")]
        file: String,
        /// Report whether the file would change without writing it
        #[arg(long)]
        check: bool,
    },

    /// Print the target's known words (latest first)
    Words {
        /// Only the words defined after `marker`
        #[arg(long, conflicts_with = "alpha")]
        user: bool,
        /// Sort alphabetically
        #[arg(long)]
        alpha: bool,
    },

    /// Report whether each word is known to the target
    Find {
        #[arg(value_name = "WORD", required = true)]
        words: Vec<String>,
    },

    /// Print a file as it would be uploaded
    Sanitize {
        #[arg(value_name = "FILE")]
        file: String,
        /// Show the text the resolver analyses instead
        #[arg(long)]
        analysis: bool,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();
    tracing::debug!("forthtalk {}", FORTHTALK_VERSION);

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    let session = &cli.session;
    match cli.command {
        Command::Resolve { file } => commands::resolve_file(session, &file),
        Command::Defs => commands::print_definitions(session),
        Command::Send { file } => commands::send_file(session, &file),
        Command::Comp { file } => commands::compile_file(session, &file),
        Command::Hex { file, check } => commands::hex_file(session, &file, check),
        Command::Words { user, alpha } => commands::list_words(session, user, alpha),
        Command::Find { words } => commands::find_words(session, &words),
        Command::Sanitize { file, analysis } => commands::sanitize_file(session, &file, analysis),
    }
}

// ============================================================================
// Tests
// ============================================================================
