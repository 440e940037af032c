use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use tracing::{debug, error, info, instrument, span, trace, warn, Level, Span};

/// Initialize the tracing system
///
/// `RUST_LOG` takes precedence; otherwise the level follows `verbosity`
/// (0 = info, 1 = debug, 2+ = trace). Events go to stderr so stdout stays
/// free for reports.
pub fn init(verbosity: u8) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive(verbosity))?,
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(is_tty())
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

fn is_tty() -> bool {
    std::io::IsTerminal::is_terminal(&std::io::stderr())
}

/// Create a span for a whole lint run
pub fn run_span(files: usize, variants: usize) -> Span {
    span!(Level::INFO, "lint_run", files = %files, variants = %variants)
}

/// Create a span for checking one file against every variant
pub fn file_span(file: &str) -> Span {
    span!(Level::DEBUG, "lint_file", file = %file)
}

/// Emit a structured event for cache lookups
pub fn cache_event(file: &str, variant: &str, hit: bool) {
    if hit {
        debug!(file = %file, variant = %variant, "cache_hit");
    } else {
        debug!(file = %file, variant = %variant, "cache_miss");
    }
}
