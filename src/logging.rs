use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Filter used by the TUI so log lines do not draw over the screen
pub const TUI_FILTER: &str = "peru_dashboard=error";
/// Filter used by the headless commands
pub const CLI_FILTER: &str = "peru_dashboard=info,inspect_csv=info";

/// `RUST_LOG` wins over the given default directive
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber. With a log file, output goes there
/// without ANSI colours; otherwise to stderr.
pub fn init_logging(default_filter: &str, log_file: Option<&Path>) -> Result<()> {
    let filter = env_filter(default_filter);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .context("setting default subscriber failed")?;
        }
        None => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .context("setting default subscriber failed")?;
        }
    }
    Ok(())
}
