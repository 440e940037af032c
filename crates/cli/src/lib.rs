//! Command-line front end of phplint
//!
//! Wires configuration loading, the lint runner and the report/check steps
//! together and maps their outcome to a process exit code.

pub mod commands;

pub use commands::Commands;
