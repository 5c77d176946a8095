use crate::models::{DataSet, SeriesPoint};

/// Filter the dataset down to one region and project (year, y_HH).
///
/// Only numeric department cells can match. File order is kept and
/// duplicate years are not merged.
pub fn derive_series(dataset: &DataSet, selection: u32) -> Vec<SeriesPoint> {
    let wanted = f64::from(selection);

    dataset
        .rows()
        .iter()
        .filter(|row| row.department().as_number() == Some(wanted))
        .map(|row| SeriesPoint {
            year: row.year().as_number(),
            value: row.y_hh().as_number(),
        })
        .collect()
}

/// Finite (year, value) pairs split wherever a point is missing a
/// coordinate, so gaps are not bridged when drawing
pub fn plottable_segments(series: &[SeriesPoint]) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();

    for point in series {
        match point.coords() {
            Some(xy) => current.push(xy),
            None => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}
