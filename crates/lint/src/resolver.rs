//! Variant resolution
//!
//! Every enabled variant is probed once before any file is touched: one
//! process reports the interpreter version, a second one (only when the
//! version has known syntax modifiers) reports the current modifier values.
//! The outcome is an immutable [`VariantMeta`] shared by every check.

use crate::command::{
    build_flag_probe_args, build_lint_command_args, build_version_probe_args, IniType,
};
use crate::command_executor::CommandExecutor;
use phplint_cache::{fingerprint, version_key};
use phplint_core::{CommandArguments, Error, IniValue, LightKey, Result, Variant, VariantMeta};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info};

/// Maps `"<major>"` or `"<major>.<minor>"` to the INI options that change how
/// source is parsed by that interpreter line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxModifierTable {
    entries: HashMap<String, BTreeMap<String, IniType>>,
}

impl Default for SyntaxModifierTable {
    fn default() -> Self {
        let legacy: BTreeMap<String, IniType> = [
            ("short_open_tag".to_string(), IniType::Boolean),
            ("asp_tags".to_string(), IniType::Boolean),
        ]
        .into_iter()
        .collect();

        let mut table = Self::empty();
        table.insert("4", legacy.clone());
        table.insert("5", legacy);
        table
    }
}

impl SyntaxModifierTable {
    /// A table without any modifiers
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add or replace the modifiers of a version key
    pub fn insert(&mut self, version: impl Into<String>, options: BTreeMap<String, IniType>) {
        self.entries.insert(version.into(), options);
    }

    /// Modifiers of `version`, trying `major.minor` first, then `major`
    pub fn lookup(&self, version: &str) -> Option<&BTreeMap<String, IniType>> {
        let major_minor = version_key(version).ok()?;
        if let Some(options) = self.entries.get(&major_minor) {
            return Some(options);
        }
        let major = major_minor.split('.').next()?;
        self.entries.get(major)
    }
}

/// Turns configured variants into resolved metadata
pub struct VariantResolver {
    executor: Arc<dyn CommandExecutor>,
    table: SyntaxModifierTable,
}

impl VariantResolver {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            executor,
            table: SyntaxModifierTable::default(),
        }
    }

    /// Replace the syntax-modifier table
    pub fn with_table(mut self, table: SyntaxModifierTable) -> Self {
        self.table = table;
        self
    }

    pub fn table(&self) -> &SyntaxModifierTable {
        &self.table
    }

    /// Resolve every enabled variant, one after another.
    ///
    /// The first failure aborts the whole resolution.
    pub async fn resolve_all<'a, I>(&self, variants: I) -> Result<Vec<Arc<VariantMeta>>>
    where
        I: IntoIterator<Item = &'a Variant>,
    {
        let mut metas = Vec::new();
        for variant in variants.into_iter().filter(|v| v.enabled) {
            metas.push(Arc::new(self.resolve(variant).await?));
        }
        Ok(metas)
    }

    /// Resolve one variant
    pub async fn resolve(&self, variant: &Variant) -> Result<VariantMeta> {
        let version = self.probe_version(variant).await?;
        let major_minor = version_key(&version).map_err(|e| {
            Error::variant_resolution(&variant.name, e.to_string())
        })?;
        let values = self.probe_modifier_values(variant, &version).await?;

        let meta = VariantMeta {
            name: variant.name.clone(),
            executable: variant.executable.clone(),
            command_args: build_lint_command_args(&values),
            cache_key_items: LightKey::new(major_minor, fingerprint(&values)),
            version,
        };

        info!(
            variant = %meta.name,
            version = %meta.version,
            fingerprint = %meta.cache_key_items.fingerprint,
            "Resolved interpreter variant"
        );

        Ok(meta)
    }

    async fn probe_version(&self, variant: &Variant) -> Result<String> {
        let stdout = self
            .run_probe(variant, &build_version_probe_args())
            .await?;
        let version = stdout.trim().to_string();
        if version.is_empty() {
            return Err(Error::variant_resolution(
                &variant.name,
                "the interpreter printed no version",
            ));
        }
        Ok(version)
    }

    async fn probe_modifier_values(
        &self,
        variant: &Variant,
        version: &str,
    ) -> Result<BTreeMap<String, IniValue>> {
        let Some(options) = self.table.lookup(version).filter(|o| !o.is_empty()) else {
            debug!(variant = %variant.name, version = %version, "No syntax modifiers for version");
            return Ok(BTreeMap::new());
        };

        let args = build_flag_probe_args(&variant.args, options);
        let stdout = self.run_probe(variant, &args).await?;

        let values: BTreeMap<String, IniValue> =
            serde_json::from_str(stdout.trim()).map_err(|e| {
                Error::variant_resolution(
                    &variant.name,
                    format!("cannot parse syntax modifier values {:?}: {e}", stdout.trim()),
                )
            })?;

        if let Some(missing) = options.keys().find(|name| !values.contains_key(*name)) {
            return Err(Error::variant_resolution(
                &variant.name,
                format!("the interpreter did not report '{missing}'"),
            ));
        }

        Ok(values)
    }

    async fn run_probe(&self, variant: &Variant, args: &CommandArguments) -> Result<String> {
        let output = self
            .executor
            .execute(&variant.executable, args)
            .await
            .map_err(|e| Error::variant_resolution(&variant.name, e.to_string()))?;

        if !output.status.success() {
            return Err(Error::variant_resolution(
                &variant.name,
                format!(
                    "'{}' exited with {}: {}",
                    variant.executable,
                    output
                        .status
                        .code()
                        .map_or_else(|| "a signal".to_string(), |code| format!("code {code}")),
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ));
        }

        String::from_utf8(output.stdout).map_err(|e| {
            Error::variant_resolution(&variant.name, format!("non UTF-8 output: {e}"))
        })
    }
}
