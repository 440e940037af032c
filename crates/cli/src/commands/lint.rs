use clap::Args;
use phplint_config::{apply_task_args, expand_sources, ConfigLoader};
use phplint_core::{Result, EXIT_OK};
use phplint_lint::{check, CommandExecutorFactory, LintRunner, Report, ResultStore, RunOutcome};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug, Clone, Default)]
pub struct LintArgs {
    /// Files or glob patterns, relative to the project directory, added to the configured ones
    pub files: Vec<String>,

    /// Options file (defaults to ./phplint.json when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Check every file, bypassing the cache
    #[arg(long)]
    pub no_cache: bool,

    /// Clear the cache instead of linting
    #[arg(long)]
    pub cache_clear: bool,

    /// Maximum number of files checked at the same time
    #[arg(long, value_name = "N")]
    pub spawn_limit: Option<usize>,

    /// Cache entry lifetime in seconds, 0 keeps entries forever
    #[arg(long, value_name = "SECONDS")]
    pub ttl: Option<u64>,

    /// Raw task argument (no-cache, cache-clear, sl-N, ttl-N), repeatable
    #[arg(long = "arg", value_name = "TASK_ARG")]
    pub args: Vec<String>,

    /// Print a human readable report after the run
    #[arg(long)]
    pub report: bool,

    /// Exit with 1 when any file has a syntax error
    #[arg(long)]
    pub check: bool,
}

impl LintArgs {
    /// Flags folded into the task argument form, explicit `--arg` values first
    pub fn task_args(&self) -> Vec<String> {
        let mut task_args = self.args.clone();
        if self.cache_clear {
            task_args.push("cache-clear".to_string());
        }
        if self.no_cache {
            task_args.push("no-cache".to_string());
        }
        if let Some(limit) = self.spawn_limit {
            task_args.push(format!("sl-{limit}"));
        }
        if let Some(ttl) = self.ttl {
            task_args.push(format!("ttl-{ttl}"));
        }
        task_args
    }

    pub async fn execute(self, store: &ResultStore) -> Result<i32> {
        let loader = match &self.config {
            Some(file) => ConfigLoader::new().file(file),
            None => ConfigLoader::new(),
        };
        let mut config = loader.load()?;
        apply_task_args(&mut config, &self.task_args());

        let patterns: Vec<&str> = config
            .files
            .iter()
            .chain(self.files.iter())
            .map(String::as_str)
            .collect();
        let files = expand_sources(&loader.base_dir(), &patterns)?;
        if files.is_empty() && !config.cache_clear {
            warn!("No files matched the configured patterns");
        }

        let result_storage = config.result_storage.clone();
        let runner = LintRunner::new(config, CommandExecutorFactory::system())?;
        match runner.run(&files, store).await? {
            RunOutcome::Linted { files, variants } => {
                info!(files, variants, "Lint finished");
            }
            RunOutcome::Cleared | RunOutcome::ClearSkipped => {}
        }

        if self.report {
            print!("{}", Report::from_store(store, &result_storage));
        }

        if self.check {
            let outcome = check(store, &result_storage);
            if outcome.is_passed() {
                info!("{outcome}");
            } else {
                warn!("{outcome}");
            }
            return Ok(outcome.exit_code());
        }

        Ok(EXIT_OK)
    }
}
