//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::io::{self, Write};

use forthtalk_syntax::SourceLine;

use crate::config::SessionConfig;
use crate::frontend::KnownWords;
use crate::host::{Host, LineTransport, WordsView};

use super::{CliError, CliResult, ExitCode, SessionArgs};

type CliHost = Host<LineTransport<Box<dyn Write>>>;

// ============================================================================
// Session setup (shared by every command)
// ============================================================================

/// Build a host session from the environment, the startup file and the command line, in that order.
///
/// `upload` selects where lines sent to the target go: the `--out` file or stdout for commands that upload,
/// nowhere for commands that only inspect.
fn open_session(args: &SessionArgs, upload: bool) -> CliResult<CliHost> {
    let writer: Box<dyn Write> = match (&args.out, upload) {
        (Some(path), true) => {
            let file = fs::File::create(path)
                .map_err(|e| CliError::failure(format!("Error creating '{}': {}", path.display(), e)))?;
            Box::new(io::BufWriter::new(file))
        }
        (None, true) => Box::new(io::stdout()),
        (_, false) => Box::new(io::sink()),
    };

    let startup = (!args.no_config).then_some(args.config.as_path());
    let config = SessionConfig::from_env().with_startup_file(startup);
    let mut host = Host::new(config, LineTransport::new(writer));

    if let Some(path) = &args.words_file {
        let listing = fs::read_to_string(path)
            .map_err(|e| CliError::failure(format!("Error reading '{}': {}", path.display(), e)))?;
        host = host.with_known_words(KnownWords::from_listing(&listing));
    }

    host.start()?;

    let config = host.config_mut();
    for dir in &args.paths {
        config.search.push(dir.clone());
    }
    for pair in &args.lits {
        config.add_literals(pair);
    }

    Ok(host)
}

// ============================================================================
// Commands
// ============================================================================

/// `resolve FILE`: print the upload plan and any unresolved words.
pub fn resolve_file(args: &SessionArgs, file: &str) -> CliResult<ExitCode> {
    let mut host = open_session(args, false)?;
    let resolution = host.analyse_file(file)?;

    println!("Upload order:");
    for path in resolution.upload_plan() {
        println!("  {}", path.display());
    }
    if !resolution.unresolved().is_empty() {
        println!("No definitions found for: {}", resolution.unresolved().join(" "));
    }
    Ok(ExitCode::SUCCESS)
}

/// `defs`: rebuild the index and print `word file` pairs.
pub fn print_definitions(args: &SessionArgs) -> CliResult<ExitCode> {
    let mut host = open_session(args, false)?;
    let index = host.find_definitions();

    let width = index.sorted().iter().map(|(w, _)| w.len()).max().unwrap_or(0);
    for (word, file) in index.sorted() {
        println!("{word:<width$}  {file}");
    }
    Ok(ExitCode::SUCCESS)
}

pub fn send_file(args: &SessionArgs, file: &str) -> CliResult<ExitCode> {
    let mut host = open_session(args, true)?;
    host.upload_file(file)?;
    Ok(ExitCode::SUCCESS)
}

pub fn compile_file(args: &SessionArgs, file: &str) -> CliResult<ExitCode> {
    let mut host = open_session(args, true)?;
    let compilation = host.compile_file(file)?;
    let lines: usize = compilation.uploads.iter().map(|u| u.lines_sent).sum();
    tracing::info!("sent {} line(s) from {} file(s)", lines, compilation.uploads.len());
    Ok(ExitCode::SUCCESS)
}

/// `hex FILE [--check]`. In check mode a file that would change is a failure, so CI can gate on it.
pub fn hex_file(args: &SessionArgs, file: &str, check: bool) -> CliResult<ExitCode> {
    let mut host = open_session(args, false)?;
    let rewrite = host.hex_rewrite(file, check)?;

    if rewrite.changed_lines == 0 {
        println!("{}: nothing to convert", rewrite.file.display());
        return Ok(ExitCode::SUCCESS);
    }
    if check {
        println!(
            "{}: {} line(s) would be converted",
            rewrite.file.display(),
            rewrite.changed_lines
        );
        return Ok(ExitCode::FAILURE);
    }
    println!("{}: {} line(s) converted", rewrite.file.display(), rewrite.changed_lines);
    Ok(ExitCode::SUCCESS)
}

pub fn list_words(args: &SessionArgs, user: bool, alpha: bool) -> CliResult<ExitCode> {
    let mut host = open_session(args, false)?;
    let view = match (user, alpha) {
        (true, _) => WordsView::User,
        (_, true) => WordsView::Alpha,
        _ => WordsView::List,
    };
    for word in host.words(view)? {
        println!("{word}");
    }
    Ok(ExitCode::SUCCESS)
}

/// `find WORD...`: exits with failure when any word is unknown.
pub fn find_words(args: &SessionArgs, words: &[String]) -> CliResult<ExitCode> {
    let host = open_session(args, false)?;
    let mut all_found = true;
    for (word, found) in host.find_words(words.iter().map(String::as_str)) {
        if found {
            println!("Found: '{word}'");
        } else {
            println!("Not found: '{word}'");
            all_found = false;
        }
    }
    Ok(if all_found { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// `sanitize FILE [--analysis]`: print each line as the upload (or the resolver) sees it.
pub fn sanitize_file(args: &SessionArgs, file: &str, analysis: bool) -> CliResult<ExitCode> {
    let host = open_session(args, false)?;
    let path = host
        .config()
        .search
        .find(file)
        .filter(|p| p.is_file())
        .ok_or_else(|| CliError::failure(format!("File not found: {file}")))?;
    let source = fs::read_to_string(&path)
        .map_err(|e| CliError::failure(format!("Error reading '{}': {}", path.display(), e)))?;

    let registers = &host.config().registers;
    for raw in source.lines() {
        let mut line = SourceLine::new(raw);
        let keep = if analysis {
            line.sanitize_for_analysis(registers)
        } else {
            line.sanitize_for_upload(registers)
        };
        for warning in line.take_warnings() {
            tracing::warn!("{warning}");
        }
        if keep {
            println!("{}", line.text());
        }
    }
    Ok(ExitCode::SUCCESS)
}
