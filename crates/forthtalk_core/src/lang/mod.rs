//! Forth host vocabulary registries.
//!
//! This module is the “front door” for host-level vocabulary: the marker characters the sanitizer reacts to,
//! the built-in defining words the resolver understands, and the `#` directives the host dispatches.
//!
//! The design goal is to avoid stringly-typed checks scattered across the sanitizer, resolver and CLI.
//! Instead, callers work with **stable IDs** (e.g. `DefiningWordId`, `DirectiveId`) and look up
//! spellings/metadata via registry tables.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no IO, no side effects.
//! - The sanitizer enforces line handling; registries provide spellings and metadata for shared use.
//!
//! ## Examples
//! ```rust
//! use forthtalk_core::lang::defining::{self, DefiningWordId};
//!
//! assert_eq!(defining::from_str("constant"), Some(DefiningWordId::Constant));
//! assert_eq!(defining::as_str(DefiningWordId::Constant), "constant");
//! ```

pub mod defining;
pub mod directives;
pub mod markers;
pub mod registry;
