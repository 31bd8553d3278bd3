//! Line-local sanitizer for Forth source: command detection, comment/string/literal stripping, register
//! substitution and hex case normalization.
//!
//! This crate is dependency-light and shared by the resolver, the upload pipeline and the CLI.
//!
//! ## Notes
//! - Every operation works on exactly one line. Comments, strings and parentheses never continue onto the
//!   next line; a line that ends inside one produces a [`diagnostics::Warning`] and keeps its best-effort text.
//! - Vocabulary (marker spellings, literal shapes) comes from `forthtalk_core`.
//!
//! ## Examples
//! ```rust
//! use forthtalk_syntax::line::SourceLine;
//!
//! let mut line = SourceLine::new(": blink ( -- ) led toggle ; \\ flash it\n");
//! assert!(!line.is_command());
//! assert!(line.strip_comments());
//! assert_eq!(line.text(), ": blink led toggle ;");
//! ```

pub mod diagnostics;
pub mod line;
pub mod registers;
pub mod scan;

pub use diagnostics::{GroupKind, Warning};
pub use line::SourceLine;
pub use registers::{RegisterMode, RegisterTable};
pub use scan::GroupState;
