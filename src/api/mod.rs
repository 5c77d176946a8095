use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

use crate::models::{Config, DataSet, DEPARTMENT_COLUMN, VALUE_COLUMN, YEAR_COLUMN};
use crate::parser::{parse_csv, ParseIssue, ParseOptions};

pub mod file_source;
pub mod http_source;
pub use file_source::FileSource;
pub use http_source::HttpSource;

/// Columns the dashboard cannot work without
pub const REQUIRED_COLUMNS: [&str; 3] = [DEPARTMENT_COLUMN, YEAR_COLUMN, VALUE_COLUMN];

/// Why the dataset could not be loaded
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("cannot resolve '{0}' into a URL")]
    InvalidUrl(String),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV is missing required column(s): {}", .0.join(", "))]
    MissingColumn(Vec<String>),
}

/// Where the CSV text comes from
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Human readable location, used in logs and the status bar
    fn describe(&self) -> String;

    async fn fetch_text(&self) -> Result<String, LoadError>;
}

/// Parsed dataset plus the malformed rows that were tolerated
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedData {
    pub dataset: DataSet,
    pub issues: Vec<ParseIssue>,
}

/// Explicit result of the one-shot load
pub type LoadOutcome = Result<LoadedData, LoadError>;

/// Pick the source for the configured location. Absolute http(s) URLs are
/// fetched directly, relative paths are joined onto the base URL when one is
/// configured, anything else is a local file.
pub fn source_for(config: &Config) -> Result<Box<dyn DataSource>, LoadError> {
    let location = config.source.trim();

    if location.starts_with("http://") || location.starts_with("https://") {
        let url = Url::parse(location).map_err(|_| LoadError::InvalidUrl(location.to_string()))?;
        return Ok(Box::new(HttpSource::new(url)?));
    }

    if let Some(base) = &config.base_url {
        let url = base
            .join(location)
            .map_err(|_| LoadError::InvalidUrl(location.to_string()))?;
        return Ok(Box::new(HttpSource::new(url)?));
    }

    Ok(Box::new(FileSource::new(location)))
}

/// Fetch and parse the CSV once
pub async fn load(source: &dyn DataSource) -> LoadOutcome {
    info!("📥 Loading CSV from {}", source.describe());

    let text = source.fetch_text().await?;
    let parsed = parse_csv(&text, ParseOptions::default())?;

    let missing = parsed.missing_columns(&REQUIRED_COLUMNS);
    if !missing.is_empty() {
        return Err(LoadError::MissingColumn(
            missing.into_iter().map(str::to_string).collect(),
        ));
    }

    if !parsed.issues.is_empty() {
        warn!("⚠️ {} malformed rows in {}", parsed.issues.len(), source.describe());
    }
    info!("✅ Loaded {} rows", parsed.rows.len());

    Ok(LoadedData {
        dataset: DataSet::from(parsed.rows),
        issues: parsed.issues,
    })
}
