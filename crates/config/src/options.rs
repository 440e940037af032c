//! Raw lint options as written by users
//!
//! Every field is optional. Nothing here is interpreted until
//! [`LintOptions::resolve`] runs the defaulting pass.

use crate::cache::{CacheSetting, CacheSettings};
use crate::config::LintConfig;
use indexmap::IndexMap;
use phplint_core::{
    Error, PhpCliArgs, Result, Variant, DEFAULT_EXECUTABLE, DEFAULT_VARIANT_NAME, LINT_TASK_NAME,
};
use serde::{Deserialize, Serialize};

/// Options of the lint task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintOptions {
    /// Path segments of the shared result, joined with `.`
    pub result_storage: Option<Vec<String>>,
    /// Maximum number of files checked at the same time
    pub spawn_limit: Option<usize>,
    pub cache: Option<CacheSetting>,
    pub cache_clear: Option<bool>,
    /// Interpreter variants keyed by name
    pub php: Option<IndexMap<String, VariantOptions>>,
    /// Glob patterns of the files to check
    pub files: Option<Vec<String>>,
}

/// Raw options of one interpreter variant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantOptions {
    pub enabled: Option<bool>,
    pub executable: Option<String>,
    pub args: Option<CliArgsOptions>,
}

/// Raw interpreter arguments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CliArgsOptions {
    pub config: Option<String>,
    /// `"name=value"` mapped to whether the define is enabled
    pub define: Option<IndexMap<String, bool>>,
}

impl LintOptions {
    /// Apply every default once and validate the outcome.
    pub fn resolve(self) -> Result<LintConfig> {
        let result_storage = self
            .result_storage
            .unwrap_or_else(|| default_result_storage(LINT_TASK_NAME))
            .join(".");
        if result_storage.is_empty() {
            return Err(Error::configuration("resultStorage must not be empty"));
        }

        let spawn_limit = self.spawn_limit.unwrap_or_else(default_spawn_limit);
        if spawn_limit == 0 {
            return Err(Error::configuration("spawnLimit must be at least 1"));
        }

        let cache = CacheSettings::from_setting(self.cache)?;

        let variants = match self.php {
            Some(php) if !php.is_empty() => php
                .into_iter()
                .map(|(name, options)| options.resolve(name))
                .collect::<Result<Vec<_>>>()?,
            _ => vec![Variant::new(DEFAULT_VARIANT_NAME, DEFAULT_EXECUTABLE)],
        };

        if !variants.iter().any(|variant| variant.enabled) {
            return Err(Error::configuration(
                "at least one interpreter variant must be enabled",
            ));
        }

        Ok(LintConfig {
            result_storage,
            spawn_limit,
            cache,
            cache_clear: self.cache_clear.unwrap_or(false),
            variants,
            files: self.files.unwrap_or_default(),
        })
    }
}

impl VariantOptions {
    fn resolve(self, name: String) -> Result<Variant> {
        let executable = self
            .executable
            .unwrap_or_else(|| DEFAULT_EXECUTABLE.to_string());
        if executable.trim().is_empty() {
            return Err(Error::configuration(format!(
                "variant '{name}' has an empty executable"
            )));
        }

        let args = self.args.unwrap_or_default();

        Ok(Variant {
            name,
            enabled: self.enabled.unwrap_or(true),
            executable,
            args: PhpCliArgs {
                config: args.config.filter(|config| !config.is_empty()),
                define: args.define.unwrap_or_default(),
            },
        })
    }
}

/// `["options", <task>, "result"]`
pub fn default_result_storage(task_name: &str) -> Vec<String> {
    vec![
        "options".to_string(),
        task_name.to_string(),
        "result".to_string(),
    ]
}

fn default_spawn_limit() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
