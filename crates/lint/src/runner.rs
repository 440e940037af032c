//! Lint run scheduling
//!
//! Files are checked with bounded parallelism (`spawn_limit` permits); the
//! variants of one file run concurrently without a bound. The first fatal
//! error stops new files from starting, lets started ones finish and is
//! returned once to the caller.

use crate::command_executor::CommandExecutor;
use crate::executor::{LintExecutor, LintOutcome};
use crate::resolver::{SyntaxModifierTable, VariantResolver};
use crate::result::{LintResult, ResultStore};
use futures::future::join_all;
use phplint_cache::{content_hash, CacheGateway, CacheKey};
use phplint_config::LintConfig;
use phplint_core::{Error, Result, VariantMeta};
use phplint_utils::tracing::{cache_event, file_span, run_span};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn, Instrument};

/// How a run ended when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every submitted file was checked with every enabled variant
    Linted { files: usize, variants: usize },
    /// Clear mode: the cache was emptied, nothing was checked
    Cleared,
    /// Clear mode with caching disabled: there was nothing to clear
    ClearSkipped,
}

/// Everything a file check needs, shared read-only by all spawned tasks
struct CheckContext {
    metas: Vec<Arc<VariantMeta>>,
    cache: Option<CacheGateway>,
    delimiter: String,
    checker: LintExecutor,
    result: Arc<LintResult>,
}

impl CheckContext {
    /// Check one file with every variant.
    ///
    /// Every started variant check runs to completion, so a sibling's
    /// outcome is still recorded and cached; the first fatal error is
    /// returned afterwards.
    async fn check_file(&self, file_path: &str) -> Result<()> {
        let hash = match &self.cache {
            Some(_) => {
                let content = tokio::fs::read(file_path)
                    .await
                    .map_err(|e| Error::file_system(file_path, "read file to lint", e))?;
                Some(content_hash(&content))
            }
            None => None,
        };

        join_all(
            self.metas
                .iter()
                .map(|meta| self.check_variant(file_path, meta, hash.as_deref())),
        )
        .await
        .into_iter()
        .collect::<Result<Vec<()>>>()?;

        Ok(())
    }

    async fn check_variant(
        &self,
        file_path: &str,
        meta: &VariantMeta,
        hash: Option<&str>,
    ) -> Result<()> {
        let light_key = meta.cache_key_items.join(&self.delimiter);
        let cached = match (&self.cache, hash) {
            (Some(cache), Some(hash)) => Some((cache, CacheKey::new(meta.cache_key_items.clone(), hash))),
            _ => None,
        };

        if let Some((cache, key)) = &cached {
            if let Some(entry) = cache.get(key, file_path).await? {
                cache_event(file_path, &meta.name, true);
                if !entry.is_clean() {
                    self.result.record_diagnostic(file_path, &light_key, entry);
                }
                return Ok(());
            }
            cache_event(file_path, &meta.name, false);
        }

        let outcome = self.checker.execute(meta, file_path).await?;
        if let LintOutcome::Diagnostic(entry) = &outcome {
            warn!(file = %file_path, variant = %meta.name, "Syntax error detected");
            self.result
                .record_diagnostic(file_path, &light_key, entry.clone());
        }

        if let Some((cache, key)) = &cached {
            cache.set(key, file_path, outcome.entry()).await?;
        }

        Ok(())
    }
}

/// Orchestrates a lint run: resolution, fan-out, caching and aggregation
pub struct LintRunner {
    config: LintConfig,
    executor: Arc<dyn CommandExecutor>,
    cache: Option<CacheGateway>,
    table: SyntaxModifierTable,
}

impl LintRunner {
    /// Build a runner with the cache backend named by the configuration
    pub fn new(config: LintConfig, executor: Arc<dyn CommandExecutor>) -> Result<Self> {
        let cache = CacheGateway::from_settings(&config.cache)?;
        Ok(Self {
            config,
            executor,
            cache,
            table: SyntaxModifierTable::default(),
        })
    }

    /// Use an explicit gateway instead of the configured one
    pub fn with_cache(mut self, cache: Option<CacheGateway>) -> Self {
        self.cache = cache;
        self
    }

    /// Replace the syntax-modifier table used during resolution
    pub fn with_syntax_modifiers(mut self, table: SyntaxModifierTable) -> Self {
        self.table = table;
        self
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    pub fn cache(&self) -> Option<&CacheGateway> {
        self.cache.as_ref()
    }

    /// Run in the configured mode against `files`.
    ///
    /// Diagnostics land in the result at `config.result_storage` inside
    /// `store`. Resolution errors are returned before any file is touched.
    pub async fn run<P: AsRef<Path>>(&self, files: &[P], store: &ResultStore) -> Result<RunOutcome> {
        if self.config.cache_clear {
            return self.clear().await;
        }

        let metas = VariantResolver::new(Arc::clone(&self.executor))
            .with_table(self.table.clone())
            .resolve_all(self.config.enabled_variants())
            .await?;

        let result = store.get_or_create(&self.config.result_storage);
        result.increment_total(files.len());

        let files: Vec<PathBuf> = files.iter().map(|f| f.as_ref().to_path_buf()).collect();
        let span = run_span(files.len(), metas.len());
        let context = Arc::new(CheckContext {
            metas,
            cache: self.cache.clone(),
            delimiter: self.config.cache.delimiter.clone(),
            checker: LintExecutor::new(Arc::clone(&self.executor)),
            result,
        });

        self.lint_files(files, context).instrument(span).await
    }

    async fn clear(&self) -> Result<RunOutcome> {
        match &self.cache {
            Some(cache) => {
                cache.clear().await?;
                info!("Cache cleared");
                Ok(RunOutcome::Cleared)
            }
            None => {
                warn!("Cache clear requested but caching is disabled");
                Ok(RunOutcome::ClearSkipped)
            }
        }
    }

    async fn lint_files(&self, files: Vec<PathBuf>, context: Arc<CheckContext>) -> Result<RunOutcome> {
        let total = files.len();
        let variants = context.metas.len();
        info!(files = total, variants, spawn_limit = self.config.spawn_limit, "Starting lint run");

        let semaphore = Arc::new(Semaphore::new(self.config.spawn_limit.max(1)));
        let first_error: Arc<Mutex<Option<Error>>> = Arc::new(Mutex::new(None));
        let mut tasks = JoinSet::new();

        for file in files {
            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|e| Error::configuration(format!("spawn limiter closed: {e}")))?;

            if has_error(&first_error) {
                debug!("Fatal error recorded, not starting further files");
                break;
            }

            let file_path = file.to_string_lossy().into_owned();
            let context = Arc::clone(&context);
            let first_error = Arc::clone(&first_error);
            let span = file_span(&file_path);

            tasks.spawn(
                async move {
                    let _permit = permit;
                    if let Err(e) = context.check_file(&file_path).await {
                        error!(file = %file_path, error = %e, "Lint check failed");
                        record_error(&first_error, e);
                    }
                }
                .instrument(span),
            );
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                record_error(
                    &first_error,
                    Error::configuration(format!("lint task failed: {e}")),
                );
            }
        }

        let failure = first_error
            .lock()
            .map_err(|e| Error::configuration(format!("Failed to acquire lock: {e}")))?
            .take();
        if let Some(e) = failure {
            return Err(e);
        }

        info!(
            files = total,
            invalid = context.result.num_of_invalid_files(),
            "Lint run completed"
        );
        Ok(RunOutcome::Linted {
            files: total,
            variants,
        })
    }
}

fn has_error(slot: &Mutex<Option<Error>>) -> bool {
    slot.lock().map(|s| s.is_some()).unwrap_or(true)
}

/// Keep only the first error
fn record_error(slot: &Mutex<Option<Error>>, error: Error) {
    if let Ok(mut slot) = slot.lock() {
        if slot.is_none() {
            *slot = Some(error);
        }
    }
}
