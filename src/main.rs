use anyhow::{anyhow, bail, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};

use peru_dashboard::analysis::derive_series;
use peru_dashboard::api;
use peru_dashboard::logging::{init_logging, CLI_FILTER, TUI_FILTER};
use peru_dashboard::models::{parse_base_url, regions, Config};
use peru_dashboard::report::{series_json, series_table};
use peru_dashboard::ui;

#[derive(Parser)]
#[command(name = "peru-dashboard")]
#[command(version)]
#[command(about = "Line chart of a Peruvian region's yearly values, 1997-2020")]
struct Args {
    /// CSV location: local path, absolute URL, or path relative to --base-url
    #[arg(long, short = 's', help = "CSV file or URL (default: input.csv)")]
    source: Option<String>,

    /// Base URL relative sources are resolved against
    #[arg(long, short = 'b', help = "Base URL for a relative --source")]
    base_url: Option<String>,

    /// Region selected at start-up
    #[arg(long, short = 'r', help = "Initial region code (1-25) or name")]
    region: Option<String>,

    /// Write logs to this file instead of stderr
    #[arg(long, help = "Log file path")]
    log_file: Option<PathBuf>,

    /// Print the series and exit instead of opening the dashboard
    #[arg(long, short = 'p')]
    print: bool,

    /// With --print, emit a JSON array of {year, value}
    #[arg(long, requires = "print")]
    json: bool,
}

impl Args {
    /// Command line values win over the environment
    fn apply(&self, mut config: Config) -> Result<Config> {
        if let Some(source) = &self.source {
            config.source = source.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = Some(parse_base_url(base_url)?);
        }
        if let Some(raw) = &self.region {
            config.initial_region = regions::parse_region(raw)
                .ok_or_else(|| anyhow!("unknown region '{}'", raw))?;
        }
        if let Some(log_file) = &self.log_file {
            config.log_file = Some(log_file.clone());
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match Config::from_env().map_err(anyhow::Error::from).and_then(|c| args.apply(c)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration Error: {}", e);
            eprintln!("Region codes run from 1 to {}.", regions::REGIONS.len());
            std::process::exit(1);
        }
    };

    let filter = if args.print { CLI_FILTER } else { TUI_FILTER };
    init_logging(filter, config.log_file.as_deref())?;

    if args.print {
        return print_series(&config, args.json).await;
    }

    if let Err(e) = ui::run_app(&config).await {
        error!("Dashboard failed: {:#}", e);
        eprintln!("❌ TUI Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Headless mode: load once, derive the initial selection and print it
async fn print_series(config: &Config, json: bool) -> Result<()> {
    let source = api::source_for(config)?;
    info!("📥 Loading {}", source.describe());

    let loaded = match api::load(source.as_ref()).await {
        Ok(loaded) => loaded,
        Err(e) => bail!("Failed to load data: {}", e),
    };
    if !loaded.issues.is_empty() {
        info!("⚠️  {} malformed rows tolerated", loaded.issues.len());
    }

    let series = derive_series(&loaded.dataset, config.initial_region);
    if json {
        println!("{}", series_json(&series)?);
    } else {
        let name = regions::region_name(config.initial_region).unwrap_or("Unknown");
        print!("{}", series_table(&format!("{} Value", name), &series));
    }
    Ok(())
}
