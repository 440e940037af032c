//! Core domain types, errors, and constants for `phplint`.
//!
//! ## Key Components
//!
//! - **`errors`**: the primary `Error` enum and `Result` alias. Every fatal
//!   failure mode of a lint run (variant resolution, process execution, cache
//!   I/O, configuration) is a variant here. Syntax diagnostics are not errors.
//! - **`types`**: variants, resolved variant metadata, cache entries and the
//!   scalar INI values that feed the syntax-modifier fingerprint.
//! - **`constants`**: exit codes, the path placeholder token and other shared
//!   literals.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result},
    types::*,
};
