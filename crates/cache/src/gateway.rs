//! Gateway between lint checks and the cache backend
//!
//! The gateway owns the two concerns every backend shares:
//! - path templating: the checked file's path is replaced by
//!   `{{ filePath }}` on write and restored to the *current* path on read, so
//!   one entry serves every file with the same content
//! - TTL pass-through: every write carries the configured time-to-live

use crate::errors::CacheError;
use crate::file::FileCache;
use crate::keys::CacheKey;
use crate::memory::MemoryCache;
use crate::traits::CacheBackend;
use phplint_config::{CacheEngine, CacheSettings};
use phplint_core::{CacheEntry, Result, CACHE_NAMESPACE, FILE_PATH_PLACEHOLDER};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Entry point for every cache read, write and clear of a lint run
#[derive(Debug, Clone)]
pub struct CacheGateway {
    backend: Arc<dyn CacheBackend>,
    ttl: Option<Duration>,
    delimiter: String,
    /// `<prefix><d>lint<d>`
    namespace: String,
}

impl CacheGateway {
    /// Wrap an existing backend
    pub fn new(backend: Arc<dyn CacheBackend>, settings: &CacheSettings) -> Self {
        let delimiter = settings.delimiter.clone();
        let namespace = format!("{}{delimiter}{CACHE_NAMESPACE}{delimiter}", settings.prefix);
        Self {
            backend,
            // A zero TTL keeps entries until they are cleared
            ttl: (!settings.ttl.is_zero()).then_some(settings.ttl),
            delimiter,
            namespace,
        }
    }

    /// Build the gateway for the configured engine; `None` when caching is off
    pub fn from_settings(settings: &CacheSettings) -> Result<Option<Self>> {
        if !settings.is_enabled() {
            return Ok(None);
        }
        let backend = Self::build_backend(settings)?;
        Ok(Some(Self::new(backend, settings)))
    }

    /// Instantiate the backend of the configured engine
    pub fn build_backend(settings: &CacheSettings) -> Result<Arc<dyn CacheBackend>> {
        let backend: Arc<dyn CacheBackend> = match settings.engine {
            CacheEngine::Memory => Arc::new(MemoryCache::new()),
            CacheEngine::File => Arc::new(FileCache::new(settings.dir.clone())),
            engine @ (CacheEngine::None | CacheEngine::Redis | CacheEngine::Mongo) => {
                return Err(CacheError::UnsupportedEngine {
                    engine: engine.to_string(),
                }
                .into())
            }
        };
        debug!(engine = %settings.engine, "Cache backend ready");
        Ok(backend)
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Backend key of a check
    pub fn storage_key(&self, key: &CacheKey) -> String {
        format!("{}{}", self.namespace, key.join(&self.delimiter))
    }

    /// Look up a check, restoring `file_path` into the captured output.
    ///
    /// An entry that does not decode as a [`CacheEntry`] is a miss, so the
    /// check runs again and overwrites it.
    pub async fn get(&self, key: &CacheKey, file_path: &str) -> Result<Option<CacheEntry>> {
        let storage_key = self.storage_key(key);
        let Some(bytes) = self.backend.get(&storage_key).await? else {
            return Ok(None);
        };

        let mut entry: CacheEntry = match serde_json::from_slice(&bytes) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key = %storage_key, error = %e, "Discarding undecodable cache entry");
                return Ok(None);
            }
        };
        entry.std_out = untemplate(&entry.std_out, file_path);
        entry.std_error = untemplate(&entry.std_error, file_path);
        Ok(Some(entry))
    }

    /// Store a check with `file_path` replaced by the placeholder
    pub async fn set(&self, key: &CacheKey, file_path: &str, entry: &CacheEntry) -> Result<()> {
        let storage_key = self.storage_key(key);
        let templated = CacheEntry {
            std_out: template(&entry.std_out, file_path),
            std_error: template(&entry.std_error, file_path),
            ..entry.clone()
        };
        let bytes = serde_json::to_vec(&templated)
            .map_err(|e| CacheError::serialization(&storage_key, e))?;

        self.backend.set(&storage_key, bytes, self.ttl).await?;
        Ok(())
    }

    /// Drop every cached check
    pub async fn clear(&self) -> Result<()> {
        self.backend.clear().await?;
        Ok(())
    }
}

fn template(output: &str, file_path: &str) -> String {
    if file_path.is_empty() {
        return output.to_string();
    }
    output.replace(file_path, FILE_PATH_PLACEHOLDER)
}

fn untemplate(output: &str, file_path: &str) -> String {
    output.replace(FILE_PATH_PLACEHOLDER, file_path)
}
