use crate::models::SeriesPoint;

/// First year of the study period
pub const FIRST_YEAR: i32 = 1997;
/// Last year of the study period
pub const LAST_YEAR: i32 = 2020;

/// Tick marks for the x axis: every year of the study period, whether or
/// not the selected region has data for it
pub fn x_ticks() -> Vec<f64> {
    (FIRST_YEAR..=LAST_YEAR).map(f64::from).collect()
}

/// X domain from the observed years. A single observed year is widened by
/// one year on each side; no years at all falls back to the study period.
pub fn x_domain(series: &[SeriesPoint]) -> (f64, f64) {
    let years = series.iter().filter_map(|p| p.year).filter(|y| y.is_finite());

    let bounds = years.fold(None, |acc: Option<(f64, f64)>, y| match acc {
        None => Some((y, y)),
        Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
    });

    match bounds {
        None => (f64::from(FIRST_YEAR), f64::from(LAST_YEAR)),
        Some((lo, hi)) if lo == hi => (lo - 1.0, hi + 1.0),
        Some(bounds) => bounds,
    }
}

/// Ticks that fall inside the domain
pub fn ticks_in_domain(domain: (f64, f64), ticks: &[f64]) -> Vec<f64> {
    ticks
        .iter()
        .copied()
        .filter(|t| *t >= domain.0 && *t <= domain.1)
        .collect()
}

/// Widest span searched for a label step that divides it exactly
const MAX_EXACT_SPAN: f64 = 1e12;

/// Axis labels spanning the whole domain, at most `max_labels` of them.
/// Integral domains get integral labels: evenly spaced when a step divides
/// the span, otherwise rounded to within half a unit of even spacing.
pub fn axis_labels(domain: (f64, f64), max_labels: usize) -> Vec<f64> {
    let (lo, hi) = domain;
    let max_intervals = max_labels.max(2) - 1;

    if !lo.is_finite() || !hi.is_finite() || hi <= lo {
        return vec![lo];
    }
    if lo.fract() != 0.0 || hi.fract() != 0.0 {
        return vec![lo, hi];
    }

    let span = hi - lo;
    if span <= MAX_EXACT_SPAN {
        if let Some(step) = exact_step(span as u64, max_intervals) {
            let step_f = step as f64;
            return (0..=span as u64 / step).map(|k| lo + k as f64 * step_f).collect();
        }
    }
    spread_labels(lo, hi, max_intervals)
}

/// Smallest step splitting `span` into at most `max_intervals` equal parts,
/// provided it uses at least half of them. The search is bounded by
/// `max_intervals` candidates.
fn exact_step(span: u64, max_intervals: usize) -> Option<u64> {
    let max_intervals = max_intervals as u64;
    let smallest = span.div_ceil(max_intervals).max(1);

    (smallest..smallest + max_intervals)
        .find(|s| span % s == 0)
        .filter(|s| *s == 1 || 2 * (span / s) >= max_intervals)
}

/// `max_intervals` near-even whole-number labels from `lo` to `hi`
fn spread_labels(lo: f64, hi: f64, max_intervals: usize) -> Vec<f64> {
    let span = hi - lo;
    let intervals = max_intervals.min(span as usize).max(1);
    let width = span / intervals as f64;

    (0..=intervals)
        .map(|i| {
            if i == intervals {
                hi
            } else {
                lo + (width * i as f64).round()
            }
        })
        .collect()
}

/// Y axis bounds rounded out to a readable step
#[derive(Debug, Clone, PartialEq)]
pub struct NiceScale {
    pub lower: f64,
    pub upper: f64,
    pub step: f64,
    pub ticks: Vec<f64>,
}

/// Auto-scaled value axis. Zero is always inside the domain.
pub fn y_scale(series: &[SeriesPoint], tick_count: usize) -> NiceScale {
    let values = series.iter().filter_map(|p| p.value).filter(|v| v.is_finite());
    let (lo, hi) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    nice_scale(lo, hi, tick_count)
}

pub fn nice_scale(min: f64, max: f64, tick_count: usize) -> NiceScale {
    let count = tick_count.max(2);

    let (mut lo, mut hi) = if min <= max { (min, max) } else { (max, min) };
    if !lo.is_finite() || !hi.is_finite() {
        lo = 0.0;
        hi = 1.0;
    }
    if lo == hi {
        if lo > 0.0 {
            lo = 0.0;
        } else if lo < 0.0 {
            hi = 0.0;
        } else {
            hi = 1.0;
        }
    }

    // Dividing before subtracting keeps the width finite near f64::MAX
    let intervals_wanted = (count - 1) as f64;
    let raw = hi / intervals_wanted - lo / intervals_wanted;
    let Some(step) = nice_step(raw) else {
        return plain_scale(lo, hi, count);
    };

    let lower = (lo / step).floor() * step;
    let upper = (hi / step).ceil() * step;
    let intervals = (upper / step - lower / step).round();
    if !lower.is_finite() || !upper.is_finite() || !(1.0..=(4 * count) as f64).contains(&intervals) {
        return plain_scale(lo, hi, count);
    }

    let ticks = (0..=intervals as usize)
        .map(|i| clean(lower + i as f64 * step, step))
        .collect();

    NiceScale {
        lower: clean(lower, step),
        upper: clean(upper, step),
        step,
        ticks,
    }
}

/// Unrounded scale for ranges a decimal step cannot describe, such as
/// subnormal values or spans near the limits of f64
fn plain_scale(lo: f64, hi: f64, count: usize) -> NiceScale {
    let intervals = (count - 1) as f64;
    let step = hi / intervals - lo / intervals;

    let ticks = if step.is_normal() {
        // Interpolating between the ends never overflows
        (0..count)
            .map(|i| {
                let f = i as f64 / intervals;
                lo * (1.0 - f) + hi * f
            })
            .collect()
    } else {
        vec![lo, hi]
    };

    NiceScale {
        lower: lo,
        upper: hi,
        step,
        ticks,
    }
}

/// Smallest of {1, 2, 2.5, 5, 10} x 10^k not below `raw`, or `None` when
/// that step is not a normal positive float
fn nice_step(raw: f64) -> Option<f64> {
    if !raw.is_normal() || raw < 0.0 {
        return None;
    }

    let exponent = raw.log10().floor() as i32;
    // Dividing by an exact power of ten keeps steps like 0.1 exact
    let magnitude = 10f64.powi(exponent.abs());
    let normalized = if exponent >= 0 { raw / magnitude } else { raw * magnitude };

    let factor = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .find(|f| normalized <= f + 1e-9)
        .unwrap_or(10.0);

    let step = if exponent >= 0 {
        factor * magnitude
    } else {
        factor / magnitude
    };
    Some(step).filter(|s| s.is_normal())
}

/// Largest number of decimals float noise is stripped at
const MAX_CLEAN_DECIMALS: f64 = 15.0;

/// Strip float noise such as 0.30000000000000004 from step multiples
fn clean(value: f64, step: f64) -> f64 {
    let decimals = (-step.log10().floor()).max(0.0) + 1.0;
    if !decimals.is_finite() || decimals > MAX_CLEAN_DECIMALS {
        return value;
    }

    let factor = 10f64.powi(decimals as i32);
    let scaled = (value * factor).round();
    if scaled.is_finite() {
        scaled / factor
    } else {
        value
    }
}
