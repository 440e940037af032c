//! Lint orchestration for phplint
//!
//! This crate resolves interpreter variants, schedules syntax checks with
//! bounded parallelism, consults the cache and aggregates diagnostics into a
//! shared result that the report and check steps read.

pub mod check;
pub mod command;
pub mod command_executor;
pub mod executor;
pub mod report;
pub mod resolver;
pub mod result;
pub mod runner;

pub use check::{check, CheckOutcome};
pub use command::IniType;
pub use command_executor::*;
pub use executor::*;
pub use report::*;
pub use resolver::*;
pub use result::*;
pub use runner::*;
