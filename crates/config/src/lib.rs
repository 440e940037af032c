//! Configuration for phplint
//!
//! Raw options arrive with every field optional (from a JSON file or built in
//! code). [`LintOptions::resolve`] applies all defaults in one pass and
//! validates the outcome, producing the immutable [`LintConfig`] a run uses.

pub mod cache;
pub mod config;
pub mod loader;
pub mod options;
pub mod sources;
pub mod task_args;

pub use cache::*;
pub use config::*;
pub use loader::*;
pub use options::*;
pub use sources::*;
pub use task_args::*;
