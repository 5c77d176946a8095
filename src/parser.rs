//! Lenient CSV parsing into dynamically typed rows

use std::collections::HashMap;
use tracing::debug;

use crate::models::{Cell, Row};

/// Column that collects fields beyond the header width
pub const EXTRA_FIELDS_COLUMN: &str = "__parsed_extra";

/// Values at or beyond ±2^53 are kept as text rather than losing precision
const MAX_SAFE_NUMBER: f64 = 9_007_199_254_740_992.0;

/// Options controlling how raw CSV text becomes rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// First row names the fields; otherwise fields are keyed by column index
    pub header: bool,
    /// Convert numeric, boolean and empty fields instead of keeping text
    pub dynamic_typing: bool,
    /// Drop blank lines instead of turning them into empty rows
    pub skip_empty_lines: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            header: true,
            dynamic_typing: true,
            skip_empty_lines: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    TooFewFields,
    TooManyFields,
}

/// A tolerated problem with one data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Zero-based index into the parsed rows
    pub row: usize,
    pub kind: IssueKind,
    pub expected: usize,
    pub found: usize,
}

impl std::fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let what = match self.kind {
            IssueKind::TooFewFields => "too few fields",
            IssueKind::TooManyFields => "too many fields",
        };
        write!(f, "row {}: {} (expected {}, found {})", self.row, what, self.expected, self.found)
    }
}

/// Result of a parse: rows in file order plus any tolerated issues
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedCsv {
    pub fields: Vec<String>,
    pub rows: Vec<Row>,
    pub issues: Vec<ParseIssue>,
}

impl ParsedCsv {
    /// Required columns absent from the header
    pub fn missing_columns<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|name| !self.fields.iter().any(|f| f == name))
            .collect()
    }
}

/// Parse CSV text. Only unreadable input is an error; short or long rows
/// are kept and reported in `issues`.
pub fn parse_csv(text: &str, options: ParseOptions) -> Result<ParsedCsv, csv::Error> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let blank_slots = if options.skip_empty_lines {
        Vec::new()
    } else {
        blank_line_slots(text)
    };
    let mut next_blank = 0;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut parsed = ParsedCsv::default();

    for (raw_index, result) in reader.records().enumerate() {
        let record = result?;

        while next_blank < blank_slots.len() && blank_slots[next_blank] <= raw_index {
            parsed.rows.push(Row::new());
            next_blank += 1;
        }

        if options.header && raw_index == 0 {
            parsed.fields = unique_field_names(record.iter());
            continue;
        }

        let row = if options.header {
            header_row(&record, &parsed.fields, options, parsed.rows.len(), &mut parsed.issues)
        } else {
            record
                .iter()
                .enumerate()
                .map(|(i, raw)| (i.to_string(), convert_field(raw, options.dynamic_typing)))
                .collect()
        };
        parsed.rows.push(row);
    }

    for _ in next_blank..blank_slots.len() {
        parsed.rows.push(Row::new());
    }

    debug!(
        "Parsed {} rows with {} fields ({} issues)",
        parsed.rows.len(),
        parsed.fields.len(),
        parsed.issues.len()
    );
    Ok(parsed)
}

fn header_row(
    record: &csv::StringRecord,
    fields: &[String],
    options: ParseOptions,
    row_index: usize,
    issues: &mut Vec<ParseIssue>,
) -> Row {
    let mut row = Row::new();
    for (name, raw) in fields.iter().zip(record.iter()) {
        row.insert(name.clone(), convert_field(raw, options.dynamic_typing));
    }

    let found = record.len();
    let expected = fields.len();
    if found < expected {
        issues.push(ParseIssue { row: row_index, kind: IssueKind::TooFewFields, expected, found });
    } else if found > expected {
        let extra: Vec<&str> = record.iter().skip(expected).collect();
        row.insert(EXTRA_FIELDS_COLUMN, Cell::Text(extra.join(",")));
        issues.push(ParseIssue { row: row_index, kind: IssueKind::TooManyFields, expected, found });
    }
    row
}

/// Repeated header names get a numeric suffix so no column is shadowed
fn unique_field_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    names
        .map(|name| {
            let count = seen.entry(name.to_string()).or_insert(0);
            *count += 1;
            if *count == 1 {
                name.to_string()
            } else {
                format!("{}_{}", name, *count - 1)
            }
        })
        .collect()
}

/// Record positions (counting the header) in front of which a blank line
/// appears. Lines inside quoted fields are not blank lines.
fn blank_line_slots(text: &str) -> Vec<usize> {
    let mut slots = Vec::new();
    let mut records = 0;
    let mut in_quotes = false;

    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.last().map_or(false, |l| l.is_empty()) {
        lines.pop();
    }

    for line in lines {
        if !in_quotes {
            if line.trim_end_matches('\r').is_empty() {
                slots.push(records);
                continue;
            }
            records += 1;
        }
        let quotes = line.bytes().filter(|b| *b == b'"').count();
        if quotes % 2 == 1 {
            in_quotes = !in_quotes;
        }
    }
    slots
}

/// Convert one raw field according to the dynamic typing rules
pub fn convert_field(raw: &str, dynamic_typing: bool) -> Cell {
    if !dynamic_typing {
        return Cell::Text(raw.to_string());
    }

    match raw {
        "" => Cell::Null,
        "true" | "TRUE" => Cell::Bool(true),
        "false" | "FALSE" => Cell::Bool(false),
        _ if looks_numeric(raw) => match raw.trim().parse::<f64>() {
            Ok(n) if n > -MAX_SAFE_NUMBER && n < MAX_SAFE_NUMBER => Cell::Number(n),
            _ => Cell::Text(raw.to_string()),
        },
        _ => Cell::Text(raw.to_string()),
    }
}

/// Optional minus, digits with at most one dot, optional exponent,
/// surrounding whitespace allowed
fn looks_numeric(raw: &str) -> bool {
    let s = raw.trim();
    let s = s.strip_prefix('-').unwrap_or(s);

    let (mantissa, exponent) = match s.find(|c: char| c == 'e' || c == 'E') {
        Some(i) => (&s[..i], Some(&s[i + 1..])),
        None => (s, None),
    };

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

    let mantissa_ok = match mantissa.split_once('.') {
        Some((int, frac)) => {
            all_digits(int) && all_digits(frac) && !(int.is_empty() && frac.is_empty())
        }
        None => !mantissa.is_empty() && all_digits(mantissa),
    };

    let exponent_ok = match exponent {
        None => true,
        Some(e) => {
            let digits = e.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(e);
            !digits.is_empty() && all_digits(digits)
        }
    };

    mantissa_ok && exponent_ok
}
