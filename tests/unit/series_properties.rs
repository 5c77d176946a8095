//! Selection, series derivation and axis properties through the public API

use pretty_assertions::assert_eq;
use std::collections::HashSet;
use test_log::test;

use crate::common::{fixtures, logging};
use peru_dashboard::analysis::{
    derive_series, monotone, nice_scale, plottable_segments, x_ticks, y_scale,
};
use peru_dashboard::api::LoadedData;
use peru_dashboard::models::{regions, DataSet, Row, SeriesPoint, REGIONS};
use peru_dashboard::parser::{parse_csv, ParseOptions};
use peru_dashboard::ui::chart::ChartModel;
use peru_dashboard::ui::{DashboardState, LoadState};

fn loaded_state(selection: u32, dataset: DataSet) -> DashboardState {
    let mut state = DashboardState::new(selection);
    state.apply_load(Ok(LoadedData {
        dataset,
        issues: Vec::new(),
    }));
    state
}

#[test]
fn test_region_table_is_complete_and_unique() {
    logging::init_test_logging();
    logging::log_test_step("Checking the region table");

    assert_eq!(REGIONS.len(), 25);
    let codes: HashSet<u32> = REGIONS.iter().map(|r| r.code).collect();
    let names: HashSet<&str> = REGIONS.iter().map(|r| r.name).collect();
    assert_eq!(codes.len(), 25);
    assert_eq!(names.len(), 25);

    for code in 1..=25 {
        let state = DashboardState::new(code);
        assert_eq!(Some(state.selection_name().as_str()), regions::region_name(code));
    }
    assert_eq!(regions::region_name(1), Some("Amazonas"));
    assert_eq!(regions::region_name(15), Some("Lima"));
    assert_eq!(regions::region_name(25), Some("Ucayali"));
}

#[test]
fn test_filter_keeps_only_selected_department() {
    let dataset = DataSet::from(vec![
        Row::record(1.0, 1997.0, 10.0),
        Row::record(2.0, 1997.0, 20.0),
    ]);

    assert_eq!(derive_series(&dataset, 1), vec![SeriesPoint::new(1997.0, 10.0)]);
}

#[test]
fn test_selection_change_rederives_from_loaded_rows() {
    let mut state = loaded_state(
        1,
        DataSet::from(vec![
            Row::record(1.0, 1997.0, 10.0),
            Row::record(2.0, 1997.0, 20.0),
        ]),
    );
    assert_eq!(state.series(), &[SeriesPoint::new(1997.0, 10.0)]);

    state.select_region(2);
    assert_eq!(state.series(), &[SeriesPoint::new(1997.0, 20.0)]);
    assert_eq!(state.dataset().len(), 2);
}

#[test]
fn test_region_without_rows_is_empty_not_failed() {
    let state = loaded_state(3, fixtures::sample_dataset());

    assert!(state.series().is_empty());
    assert!(state.has_no_data());
    assert_eq!(state.load_state(), &LoadState::Loaded { rows: 6, malformed: 0 });
}

#[test]
fn test_duplicate_years_are_kept_in_file_order() {
    let series = derive_series(&fixtures::sample_dataset(), 15);

    assert_eq!(
        series,
        vec![SeriesPoint::new(2001.0, 5.5), SeriesPoint::new(2001.0, 6.0)]
    );
}

#[test]
fn test_codes_outside_the_table_never_match_a_region() {
    let dataset = fixtures::sample_dataset();
    let matched: usize = REGIONS
        .iter()
        .map(|r| derive_series(&dataset, r.code).len())
        .sum();

    assert_eq!(matched, dataset.len() - 1);
}

#[test]
fn test_x_ticks_cover_study_period() {
    let ticks = x_ticks();
    let expected: Vec<f64> = (1997..=2020).map(f64::from).collect();

    assert_eq!(ticks.len(), 24);
    assert_eq!(ticks, expected);
}

#[test]
fn test_smoothing_passes_through_points_without_overshoot() {
    let points = [
        (1997.0, 3.0),
        (1998.0, 9.0),
        (1999.0, 9.5),
        (2000.0, 1.0),
        (2003.0, 4.0),
        (2004.0, 4.0),
        (2005.0, 12.0),
    ];
    let samples = 6;
    let curve = monotone::smooth(&points, samples);
    logging::log_test_data("curve length", &curve.len());

    for (i, pair) in points.windows(2).enumerate() {
        assert_eq!(curve[i * samples], pair[0]);
        assert_eq!(curve[(i + 1) * samples], pair[1]);

        let lo = pair[0].1.min(pair[1].1) - 1e-9;
        let hi = pair[0].1.max(pair[1].1) + 1e-9;
        for &(x, y) in &curve[i * samples..=(i + 1) * samples] {
            assert!(x >= pair[0].0 - 1e-9 && x <= pair[1].0 + 1e-9);
            assert!(y >= lo && y <= hi, "segment {} overshoots: {}", i, y);
        }
    }
}

#[test]
fn test_gaps_split_segments() {
    let series = vec![
        SeriesPoint::new(1997.0, 1.0),
        SeriesPoint::new(1998.0, 2.0),
        SeriesPoint { year: Some(1999.0), value: None },
        SeriesPoint::new(2000.0, 3.0),
    ];

    assert_eq!(
        plottable_segments(&series),
        vec![vec![(1997.0, 1.0), (1998.0, 2.0)], vec![(2000.0, 3.0)]]
    );
}

#[test]
fn test_nice_scale_contains_data_with_even_ticks() {
    for (min, max) in [(0.0, 7.3), (-12.0, 48.0), (0.02, 0.91), (1200.0, 98_500.0)] {
        let scale = nice_scale(min, max, 5);

        assert!(scale.lower <= min && scale.upper >= max);
        assert_eq!(scale.ticks.first(), Some(&scale.lower));
        assert_eq!(scale.ticks.last(), Some(&scale.upper));
        for pair in scale.ticks.windows(2) {
            assert!(((pair[1] - pair[0]) - scale.step).abs() < scale.step * 1e-9);
        }
    }
}

#[test]
fn test_value_axis_starts_at_zero_for_positive_data() {
    let scale = y_scale(&[SeriesPoint::new(1997.0, 40.0), SeriesPoint::new(1998.0, 55.0)], 5);

    assert_eq!(scale.lower, 0.0);
    assert!(scale.upper >= 55.0);
}

#[test]
fn test_chart_model_survives_extreme_parsed_values() {
    logging::init_test_logging();
    let text = "department,year,y_HH\n\
                1,1997,1e-310\n\
                1,1998,5e-324\n\
                2,1997,9e15\n\
                2,1998,-9e15\n\
                3,1997,0\n\
                3,2020,0\n\
                4,1997,12\n\
                4,1000000007,13\n";
    let parsed = parse_csv(text, ParseOptions::default()).unwrap();
    assert!(parsed.issues.is_empty());
    let dataset = DataSet::from(parsed.rows);

    for code in 1..=4 {
        logging::log_test_data("region", &code);
        let state = loaded_state(code, dataset.clone());
        let model = ChartModel::build(&state, 80);

        let (left, right) = model.x_domain;
        assert!(left.is_finite() && right.is_finite() && left < right);
        assert!(model.y.lower.is_finite() && model.y.upper.is_finite());
        assert!(model.y.lower < model.y.upper);
        assert!(model.y.lower <= 0.0 && model.y.upper >= 0.0);
        assert!(!model.y.ticks.is_empty());
        assert!(!model.x_labels.is_empty());
        assert!(model
            .segments
            .iter()
            .flatten()
            .all(|(x, y)| x.is_finite() && y.is_finite()));
    }
}
