use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use peru_dashboard::api;
use peru_dashboard::logging::{init_logging, CLI_FILTER};
use peru_dashboard::models::{parse_base_url, Config};
use peru_dashboard::report::region_coverage;

/// How many parse issues are listed before summarising the rest
const SHOWN_ISSUES: usize = 5;

#[derive(Parser)]
#[command(name = "inspect_csv")]
#[command(about = "Load the dashboard CSV and report what it contains")]
struct Args {
    /// CSV location, defaults to the configured source
    #[arg(long, short = 's')]
    source: Option<String>,

    /// Base URL for a relative source
    #[arg(long, short = 'b')]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging(CLI_FILTER, None)?;
    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(source) = args.source {
        config.source = source;
    }
    if let Some(base_url) = args.base_url {
        config.base_url = Some(parse_base_url(&base_url)?);
    }

    let source = api::source_for(&config)?;
    info!("🔍 Inspecting {}", source.describe());

    let loaded = api::load(source.as_ref()).await?;
    info!("📊 {} rows", loaded.dataset.len());

    if loaded.issues.is_empty() {
        info!("✅ No malformed rows");
    } else {
        warn!("⚠️  {} malformed rows", loaded.issues.len());
        for issue in loaded.issues.iter().take(SHOWN_ISSUES) {
            warn!("   {}", issue);
        }
        if loaded.issues.len() > SHOWN_ISSUES {
            warn!("   ... and {} more", loaded.issues.len() - SHOWN_ISSUES);
        }
    }

    for coverage in region_coverage(&loaded.dataset) {
        match (coverage.first_year, coverage.last_year) {
            (Some(first), Some(last)) => info!(
                "{:>2} {:<14} {:>3} points  {}-{}",
                coverage.code, coverage.name, coverage.points, first, last
            ),
            _ => info!(
                "{:>2} {:<14} {:>3} points",
                coverage.code, coverage.name, coverage.points
            ),
        }
    }

    Ok(())
}
