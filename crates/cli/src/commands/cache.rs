use clap::Subcommand;
use phplint_config::ConfigLoader;
use phplint_core::{Result, EXIT_OK};
use phplint_lint::{CommandExecutorFactory, LintRunner, ResultStore, RunOutcome};
use std::path::PathBuf;

#[derive(Subcommand, Debug, Clone)]
pub enum CacheCommands {
    /// Remove every cached lint entry
    Clear {
        /// Options file (defaults to ./phplint.json when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

impl CacheCommands {
    pub async fn execute(self, store: &ResultStore) -> Result<i32> {
        match self {
            CacheCommands::Clear { config } => {
                let loader = match config {
                    Some(file) => ConfigLoader::new().file(file),
                    None => ConfigLoader::new(),
                };
                let mut config = loader.load()?;
                config.cache_clear = true;

                let runner = LintRunner::new(config, CommandExecutorFactory::system())?;
                if runner.run::<PathBuf>(&[], store).await? == RunOutcome::Cleared {
                    tracing::info!("✓ Cache cleared successfully");
                }
                Ok(EXIT_OK)
            }
        }
    }
}
