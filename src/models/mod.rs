use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

pub mod regions;
pub use regions::{Region, DEFAULT_REGION, REGIONS};

/// Column holding the region code
pub const DEPARTMENT_COLUMN: &str = "department";
/// Column holding the year
pub const YEAR_COLUMN: &str = "year";
/// Column holding the plotted value
pub const VALUE_COLUMN: &str = "y_HH";

/// A dynamically typed CSV field
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Cell {
    /// Numeric value, if this cell holds one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Null => write!(f, "null"),
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => write!(f, "{}", s),
        }
    }
}

static MISSING: Cell = Cell::Null;

/// One parsed CSV record keyed by column name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: HashMap<String, Cell>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, cell: Cell) {
        self.fields.insert(column.into(), cell);
    }

    /// Field value; absent columns read as `Cell::Null`
    pub fn get(&self, column: &str) -> &Cell {
        self.fields.get(column).unwrap_or(&MISSING)
    }

    pub fn department(&self) -> &Cell {
        self.get(DEPARTMENT_COLUMN)
    }

    pub fn year(&self) -> &Cell {
        self.get(YEAR_COLUMN)
    }

    pub fn y_hh(&self) -> &Cell {
        self.get(VALUE_COLUMN)
    }

    pub fn column_count(&self) -> usize {
        self.fields.len()
    }

    /// Convenience constructor for the three columns the dashboard reads
    pub fn record(department: f64, year: f64, value: f64) -> Self {
        let mut row = Self::new();
        row.insert(DEPARTMENT_COLUMN, Cell::Number(department));
        row.insert(YEAR_COLUMN, Cell::Number(year));
        row.insert(VALUE_COLUMN, Cell::Number(value));
        row
    }
}

impl<K: Into<String>> FromIterator<(K, Cell)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, Cell)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Full set of rows loaded at start-up, in CSV order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSet {
    rows: Vec<Row>,
}

impl DataSet {
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<Row>> for DataSet {
    fn from(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

/// One (year, value) pair plotted for the selected region
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub year: Option<f64>,
    pub value: Option<f64>,
}

impl SeriesPoint {
    pub fn new(year: f64, value: f64) -> Self {
        Self {
            year: Some(year),
            value: Some(value),
        }
    }

    /// Both coordinates, when present and finite
    pub fn coords(&self) -> Option<(f64, f64)> {
        match (self.year, self.value) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((x, y)),
            _ => None,
        }
    }
}

/// Configuration errors caught before the UI starts
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("region code {0} is not one of the 25 departments")]
    UnknownRegion(u32),
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}

/// Configuration for the application
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub source: String,
    pub base_url: Option<Url>,
    pub initial_region: u32,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: "input.csv".to_string(),
            base_url: None,
            initial_region: DEFAULT_REGION,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = match lookup("DASHBOARD_BASE_URL").filter(|s| !s.trim().is_empty()) {
            Some(raw) => Some(parse_base_url(&raw)?),
            None => None,
        };

        let config = Config {
            source: lookup("DASHBOARD_SOURCE").unwrap_or(defaults.source),
            base_url,
            initial_region: lookup("DASHBOARD_REGION")
                .and_then(|s| regions::parse_region(&s))
                .unwrap_or(defaults.initial_region),
            log_file: lookup("DASHBOARD_LOG_FILE").map(PathBuf::from),
        };

        config.validate()?;
        Ok(config)
    }

    /// The initial region must come from the fixed table
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !regions::is_known_region(self.initial_region) {
            return Err(ConfigError::UnknownRegion(self.initial_region));
        }
        Ok(())
    }
}

pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|_| ConfigError::InvalidBaseUrl(raw.to_string()))
}
