//! forthtalk version information.
//!
//! The version is exposed as a single constant so the CLI and the log output agree on the same value.
//!
//! ## Notes
//!
//! - The value is taken from Cargo metadata (`CARGO_PKG_VERSION`) at compile time.

/// The forthtalk version string (for example, `0.3.0`).
pub const FORTHTALK_VERSION: &str = env!("CARGO_PKG_VERSION");
