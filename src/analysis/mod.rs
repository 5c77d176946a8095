//! Pure derivations behind the chart: series filtering, axis scaling and
//! line smoothing. Nothing here knows about the terminal.

pub mod monotone;
pub mod scale;
pub mod series;

pub use scale::{axis_labels, nice_scale, ticks_in_domain, x_domain, x_ticks, y_scale, NiceScale};
pub use series::{derive_series, plottable_segments};
