//! Cache key derivation
//!
//! Everything here is pure. The version key and the fingerprint depend only
//! on the variant and are computed once per run; the content hash is computed
//! once per file.

use lazy_static::lazy_static;
use phplint_core::{Error, IniValue, LightKey, Result};
use regex::Regex;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

lazy_static! {
    static ref VERSION_PREFIX: Regex = Regex::new(r"^(\d+)\.(\d+)(\.|$)").unwrap();
}

/// Encode syntax-modifier values as `v1-v2-...`, sorted by flag name.
///
/// Booleans render as `1`/`0`; an empty set encodes as `-`.
#[must_use]
pub fn fingerprint(values: &BTreeMap<String, IniValue>) -> String {
    if values.is_empty() {
        return "-".to_string();
    }
    values
        .values()
        .map(IniValue::render)
        .collect::<Vec<_>>()
        .join("-")
}

/// `<major>.<minor>` of an interpreter version string.
pub fn version_key(version: &str) -> Result<String> {
    VERSION_PREFIX
        .captures(version)
        .map(|caps| format!("{}.{}", &caps[1], &caps[2]))
        .ok_or_else(|| Error::invalid_version(version))
}

/// Lowercase hex SHA-256 of file content
#[must_use]
pub fn content_hash(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

/// Full key of one check: the variant's light key plus the content hash
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub light: LightKey,
    pub content_hash: String,
}

impl CacheKey {
    #[must_use]
    pub fn new(light: LightKey, content_hash: impl Into<String>) -> Self {
        Self {
            light,
            content_hash: content_hash.into(),
        }
    }

    /// `<version><d><fingerprint><d><hash>`
    #[must_use]
    pub fn join(&self, delimiter: &str) -> String {
        format!(
            "{}{delimiter}{}",
            self.light.join(delimiter),
            self.content_hash
        )
    }
}
