//! Plain-text and JSON renderings used by the headless commands

use serde::Serialize;

use crate::analysis::derive_series;
use crate::models::{DataSet, SeriesPoint, REGIONS};

/// Points and year range available for one region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionCoverage {
    pub code: u32,
    pub name: &'static str,
    pub points: usize,
    pub first_year: Option<f64>,
    pub last_year: Option<f64>,
}

/// Coverage for every region of the table, in table order
pub fn region_coverage(dataset: &DataSet) -> Vec<RegionCoverage> {
    REGIONS
        .iter()
        .map(|region| {
            let series = derive_series(dataset, region.code);
            let years: Vec<f64> = series.iter().filter_map(|p| p.year).collect();
            RegionCoverage {
                code: region.code,
                name: region.name,
                points: series.len(),
                first_year: years.iter().copied().reduce(f64::min),
                last_year: years.iter().copied().reduce(f64::max),
            }
        })
        .collect()
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Two-column table of a series, headed by the series label
pub fn series_table(label: &str, series: &[SeriesPoint]) -> String {
    let mut out = format!("{:<8} {}\n", "year", label);
    for point in series {
        out.push_str(&format!("{:<8} {}\n", cell(point.year), cell(point.value)));
    }
    if series.is_empty() {
        out.push_str("(no data)\n");
    }
    out
}

pub fn series_json(series: &[SeriesPoint]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(series)
}
