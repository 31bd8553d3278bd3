//! Provide the shared, pure vocabulary and literal helpers used by the forthtalk host tooling.
//!
//! This crate is intentionally small and dependency-free. It contains deterministic helpers that both:
//! - the line sanitizer can use to decide which tokens to strip or rewrite, and
//! - the resolver and host can use to recognize defining words and host directives.
//!
//! ## Notes
//!
//! - This is a “vocabulary core” crate: **no IO**, no global state, and no logging.
//! - Current scope: marker spellings (comments, quotes, commands), defining words, host directives, numeric
//!   literal classification and hex case normalization.

pub mod lang;
pub mod literals;

pub use literals::{LiteralKind, classify_literal, is_literal, normalize_hex_token};
