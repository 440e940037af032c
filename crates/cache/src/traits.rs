//! Storage contract of cache backends

use crate::errors::Result;
use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;

/// Core trait for cache storage
///
/// Backends store opaque bytes. Encoding entries and templating file paths is
/// the gateway's job. Implementations must tolerate concurrent `get`/`set`
/// calls from many in-flight checks.
#[async_trait]
pub trait CacheBackend: Send + Sync + Debug {
    /// Get a value from the cache
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store a value in the cache
    ///
    /// If `ttl` is `None`, the value is stored indefinitely.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<()>;

    /// Remove every entry. Clearing an empty cache is not an error.
    async fn clear(&self) -> Result<()>;
}
