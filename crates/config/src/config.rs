//! Resolved, immutable lint configuration

use crate::cache::CacheSettings;
use phplint_core::Variant;

/// Configuration of one lint run after the defaulting pass.
///
/// Cheap to clone and safe to share across tasks; nothing mutates it once a
/// run has started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintConfig {
    /// Key of the shared result in the result store
    pub result_storage: String,
    /// Bound on concurrently checked files
    pub spawn_limit: usize,
    pub cache: CacheSettings,
    /// Clear the cache instead of linting
    pub cache_clear: bool,
    /// Every configured variant, disabled ones included
    pub variants: Vec<Variant>,
    /// Glob patterns of the files to check
    pub files: Vec<String>,
}

impl LintConfig {
    pub fn enabled_variants(&self) -> impl Iterator<Item = &Variant> {
        self.variants.iter().filter(|variant| variant.enabled)
    }
}
