//! Cache-related configuration types

use phplint_core::{
    Error, Result, DEFAULT_CACHE_DELIMITER, DEFAULT_CACHE_PREFIX, DEFAULT_CACHE_TTL_SECS,
};
use phplint_utils::XdgPaths;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Storage engine behind the cache gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheEngine {
    /// Caching disabled, every check executes
    None,
    Memory,
    File,
    Redis,
    Mongo,
}

impl fmt::Display for CacheEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CacheEngine::None => "none",
            CacheEngine::Memory => "memory",
            CacheEngine::File => "file",
            CacheEngine::Redis => "redis",
            CacheEngine::Mongo => "mongo",
        };
        f.write_str(name)
    }
}

/// `cache` as written in the options file: `false`, `true` or an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CacheSetting {
    /// `false` disables caching, `true` keeps the defaults
    Simple(bool),
    Advanced(CacheOptions),
}

impl From<bool> for CacheSetting {
    fn from(value: bool) -> Self {
        CacheSetting::Simple(value)
    }
}

/// Raw cache options, every field optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheOptions {
    pub engine: Option<CacheEngine>,
    /// Seconds
    pub ttl: Option<u64>,
    pub prefix: Option<String>,
    pub delimiter: Option<String>,
    /// Directory of the file engine
    pub dir: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
    pub collection: Option<String>,
}

/// Connection parameters of networked engines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
    pub collection: Option<String>,
}

/// Resolved cache settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    pub engine: CacheEngine,
    pub ttl: Duration,
    pub prefix: String,
    pub delimiter: String,
    pub dir: PathBuf,
    pub connection: ConnectionSettings,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            engine: CacheEngine::File,
            ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            prefix: DEFAULT_CACHE_PREFIX.to_string(),
            delimiter: DEFAULT_CACHE_DELIMITER.to_string(),
            dir: XdgPaths::cache_dir(),
            connection: ConnectionSettings::default(),
        }
    }
}

impl CacheSettings {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.engine != CacheEngine::None
    }

    /// Settings with caching turned off; the delimiter still shapes light keys
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            engine: CacheEngine::None,
            ..Self::default()
        }
    }

    pub(crate) fn from_setting(setting: Option<CacheSetting>) -> Result<Self> {
        let options = match setting {
            None | Some(CacheSetting::Simple(true)) => return Ok(Self::default()),
            Some(CacheSetting::Simple(false)) => return Ok(Self::disabled()),
            Some(CacheSetting::Advanced(options)) => options,
        };

        let defaults = Self::default();
        let settings = Self {
            engine: options.engine.unwrap_or(defaults.engine),
            ttl: options.ttl.map(Duration::from_secs).unwrap_or(defaults.ttl),
            prefix: options.prefix.unwrap_or(defaults.prefix),
            delimiter: options.delimiter.unwrap_or(defaults.delimiter),
            dir: options.dir.unwrap_or(defaults.dir),
            connection: ConnectionSettings {
                host: options.host,
                port: options.port,
                database: options.database,
                collection: options.collection,
            },
        };

        if settings.delimiter.is_empty() {
            return Err(Error::configuration("cache delimiter must not be empty"));
        }

        Ok(settings)
    }
}
