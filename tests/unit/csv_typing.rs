//! Dynamic typing of CSV fields through the public parser API

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use test_log::test;

use crate::common::fixtures;
use peru_dashboard::models::Cell;
use peru_dashboard::parser::{convert_field, parse_csv, IssueKind, ParseOptions};

#[test]
fn test_numbers_bools_and_nulls_are_typed() {
    assert_eq!(convert_field("1997", true), Cell::Number(1997.0));
    assert_eq!(convert_field("-0.5", true), Cell::Number(-0.5));
    assert_eq!(convert_field("2.5e3", true), Cell::Number(2500.0));
    assert_eq!(convert_field("TRUE", true), Cell::Bool(true));
    assert_eq!(convert_field("false", true), Cell::Bool(false));
    assert_eq!(convert_field("", true), Cell::Null);
}

#[test]
fn test_non_numeric_text_stays_text() {
    assert_eq!(convert_field("Lima", true), Cell::Text("Lima".to_string()));
    assert_eq!(convert_field("True", true), Cell::Text("True".to_string()));
    assert_eq!(convert_field("1,5", true), Cell::Text("1,5".to_string()));
    assert_eq!(convert_field("12abc", true), Cell::Text("12abc".to_string()));
}

#[test]
fn test_integers_beyond_safe_range_stay_text() {
    let huge = "9007199254740993";
    assert_eq!(convert_field(huge, true), Cell::Text(huge.to_string()));
    assert_eq!(
        convert_field("9007199254740991", true),
        Cell::Number(9_007_199_254_740_991.0)
    );
}

#[test]
fn test_typing_disabled_keeps_raw_text() {
    assert_eq!(convert_field("10", false), Cell::Text("10".to_string()));
    assert_eq!(convert_field("", false), Cell::Text(String::new()));
}

#[test]
fn test_sample_csv_parses_into_typed_rows() {
    let parsed = parse_csv(fixtures::SAMPLE_CSV, ParseOptions::default()).unwrap();

    assert_eq!(parsed.fields, vec!["department", "year", "y_HH"]);
    assert_eq!(parsed.rows.len(), 6);
    assert!(parsed.issues.is_empty());

    let first = &parsed.rows[0];
    assert_eq!(first.department(), &Cell::Number(1.0));
    assert_eq!(first.year(), &Cell::Number(1997.0));
    assert_eq!(first.y_hh(), &Cell::Number(10.0));
    assert_eq!(parsed.rows[2].y_hh(), &Cell::Number(5.5));
}

#[test]
fn test_short_rows_are_kept_and_reported() {
    let parsed = parse_csv("department,year,y_HH\n1,1997\n2,1998,4\n", ParseOptions::default()).unwrap();

    assert_eq!(parsed.rows.len(), 2);
    assert_eq!(parsed.rows[0].y_hh(), &Cell::Null);
    assert_eq!(parsed.issues.len(), 1);
    assert_matches!(parsed.issues[0].kind, IssueKind::TooFewFields);
    assert_eq!(parsed.issues[0].row, 0);
}
