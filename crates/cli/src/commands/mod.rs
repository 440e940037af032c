use clap::Subcommand;
use phplint_core::Result;
use phplint_lint::ResultStore;

pub mod cache;
pub mod lint;

use self::cache::CacheCommands;
use self::lint::LintArgs;

#[derive(Subcommand)]
pub enum Commands {
    /// Check PHP files for syntax errors
    #[command(visible_alias = "l")]
    Lint(LintArgs),

    /// Manage the lint cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

impl Commands {
    /// Run the command; the returned value is the process exit code
    pub async fn execute(self, store: &ResultStore) -> Result<i32> {
        match self {
            Commands::Lint(args) => args.execute(store).await,
            Commands::Cache { command } => command.execute(store).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    #[test]
    fn test_parse_lint_flags() {
        let cli = TestCli::try_parse_from([
            "phplint",
            "lint",
            "src/a.php",
            "lib/**/*.php",
            "--no-cache",
            "--spawn-limit",
            "3",
            "--ttl",
            "60",
            "--arg",
            "cache-clear",
            "--report",
            "--check",
        ])
        .unwrap();

        let Commands::Lint(args) = cli.command else {
            panic!("expected the lint command");
        };
        assert_eq!(args.files, vec!["src/a.php", "lib/**/*.php"]);
        assert!(args.report && args.check);
        assert_eq!(
            args.task_args(),
            vec!["cache-clear", "no-cache", "sl-3", "ttl-60"]
        );
    }

    #[test]
    fn test_parse_cache_clear() {
        let cli = TestCli::try_parse_from(["phplint", "cache", "clear", "--config", "ci.json"]).unwrap();
        let Commands::Cache {
            command: CacheCommands::Clear { config },
        } = cli.command
        else {
            panic!("expected cache clear");
        };
        assert_eq!(config.unwrap().to_string_lossy(), "ci.json");
    }

    #[test]
    fn test_spawn_limit_must_be_a_number() {
        assert!(TestCli::try_parse_from(["phplint", "lint", "--spawn-limit", "many"]).is_err());
    }
}
