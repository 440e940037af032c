use clap::{ArgAction, Parser};
use phplint::commands::Commands;
use phplint_core::EXIT_FATAL;
use phplint_lint::ResultStore;
use tracing::error;

#[derive(Parser)]
#[command(name = "phplint")]
#[command(about = "Cached, parallel PHP syntax checking", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if let Err(e) = phplint_utils::tracing::init(cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let store = ResultStore::new();
    let code = match cli.command.execute(&store).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "phplint failed");
            eprintln!("Error: {:?}", eyre::Report::new(e));
            EXIT_FATAL
        }
    };

    std::process::exit(code);
}
