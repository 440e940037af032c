//! Shared utilities for phplint
//!
//! Logging setup and well-known directories used by the other workspace
//! crates.

pub mod tracing;
pub mod xdg;

pub use xdg::*;
