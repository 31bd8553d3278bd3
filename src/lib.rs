#![forbid(unsafe_code)]
//! forthtalk: upload Forth source to a small target
//!
//! A Forth target compiles words one line at a time, so every word a file uses must already be defined when
//! the file arrives. This crate works out which other source files that takes and in what order, and sends
//! them line by line with comments stripped and register names replaced by their literals.
//!
//! This crate provides the host side: frontend (search paths, symbol index, known words, resolver), the host
//! session that runs directives and uploads, and the CLI.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a registry bug (logic error), use `.expect("... missing")` with a
//!   clear explanation.

pub mod cli;
pub mod config;
pub mod frontend;
pub mod host;
pub mod version;

pub use frontend::{diagnostics, line, registers};
pub use frontend::{KnownWords, Resolution, ResolveError, Resolver, SearchPaths, SymbolIndex};

pub use config::SessionConfig;
pub use host::{Directive, Host, HostError, LineTransport, Transport};
