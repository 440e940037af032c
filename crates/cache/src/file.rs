//! File system cache backend
//!
//! Each key maps to one JSON file named by the SHA-256 of the key:
//!
//! ```json
//! { "value": { ...entry... }, "expire": 1700000000000 }
//! ```
//!
//! `expire` is a Unix timestamp in milliseconds, `null` for entries without a
//! time-to-live. Files are replaced atomically so concurrent readers never see
//! a partial entry.

use crate::errors::{CacheError, Result};
use crate::keys::content_hash;
use crate::traits::CacheBackend;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

const ENTRY_EXTENSION: &str = "json";

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    value: serde_json::Value,
    expire: Option<u64>,
}

/// Cache stored as one file per key under a directory
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{ENTRY_EXTENSION}", content_hash(key.as_bytes())))
    }
}

/// Replace the envelope file at `path` with `content` in a single rename.
///
/// The temporary file lives in the cache directory so the rename never
/// crosses file systems; it is removed again if anything fails.
fn replace_envelope(dir: &Path, path: &Path, content: &[u8]) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| CacheError::io(dir, "create directory", e))?;

    let mut staged = tempfile::Builder::new()
        .prefix(".entry-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| CacheError::io(dir, "stage", e))?;
    staged
        .write_all(content)
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|e| CacheError::io(staged.path(), "stage", e))?;

    staged
        .persist(path)
        .map_err(|e| CacheError::io(path, "replace", e.error))?;
    Ok(())
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

fn is_entry_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(ENTRY_EXTENSION)
        && path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.len() == 64 && stem.bytes().all(|b| b.is_ascii_hexdigit()))
}

async fn remove_quietly(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != ErrorKind::NotFound {
            debug!(path = %path.display(), error = %e, "Failed to remove cache file");
        }
    }
}

#[async_trait]
impl CacheBackend for FileCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.entry_path(key);
        let content = match tokio::fs::read(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::io(path, "read", e)),
        };

        let envelope: Envelope = match serde_json::from_slice(&content) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(key = %key, path = %path.display(), error = %e, "Discarding corrupted cache file");
                remove_quietly(&path).await;
                return Ok(None);
            }
        };

        if envelope.expire.is_some_and(|expire| now_millis() >= expire) {
            remove_quietly(&path).await;
            return Ok(None);
        }

        serde_json::to_vec(&envelope.value)
            .map(Some)
            .map_err(|e| CacheError::serialization(key, e))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<()> {
        let value: serde_json::Value =
            serde_json::from_slice(&value).map_err(|e| CacheError::serialization(key, e))?;
        let expire = ttl.map(|ttl| {
            now_millis().saturating_add(u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX))
        });
        let content = serde_json::to_vec(&Envelope { value, expire })
            .map_err(|e| CacheError::serialization(key, e))?;

        let dir = self.dir.clone();
        let path = self.entry_path(key);
        tokio::task::spawn_blocking(move || replace_envelope(&dir, &path, &content))
            .await
            .map_err(|e| CacheError::io(self.dir.clone(), "write", std::io::Error::other(e)))??;

        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(CacheError::io(self.dir.clone(), "list", e)),
        };

        let mut removed = 0usize;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CacheError::io(self.dir.clone(), "list", e))?
        {
            let path = entry.path();
            if !is_entry_file(&path) {
                continue;
            }
            match tokio::fs::remove_file(&path).await {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(CacheError::io(path, "remove", e)),
            }
        }

        debug!(dir = %self.dir.display(), removed, "Cleared file cache");
        Ok(())
    }
}
