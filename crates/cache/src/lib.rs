//! Cache layer for phplint
//!
//! Check results are content addressed: the key of a check is derived from
//! the interpreter version, the syntax-modifier fingerprint of the variant and
//! the SHA-256 of the file content. The crate provides:
//! - Key derivation (`keys`)
//! - A byte-oriented [`CacheBackend`] trait with memory and file backends
//! - The [`CacheGateway`], which owns path templating and TTL pass-through

pub mod errors;
pub mod file;
pub mod gateway;
pub mod keys;
pub mod memory;
pub mod traits;

pub use errors::{CacheError, Result};
pub use file::FileCache;
pub use gateway::CacheGateway;
pub use keys::*;
pub use memory::MemoryCache;
pub use traits::CacheBackend;
