use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph},
    Frame,
};

use super::components::{format_decimal, format_large_number, format_year, SERIES_COLOR};
use super::state::DashboardState;
use crate::analysis::{
    axis_labels, monotone, plottable_segments, ticks_in_domain, x_domain, x_ticks, y_scale,
    NiceScale,
};

/// Number of value ticks to aim for
pub const Y_TICK_COUNT: usize = 5;

/// Columns reserved per year label ("2020" plus spacing)
const YEAR_LABEL_WIDTH: u16 = 6;

/// Everything needed to draw the chart, computed from the state
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub x_domain: (f64, f64),
    /// Year ticks inside the domain, drawn as vertical grid lines
    pub x_grid: Vec<f64>,
    pub x_labels: Vec<f64>,
    pub y: NiceScale,
    /// Smoothed line pieces; a gap in the data starts a new piece
    pub segments: Vec<Vec<(f64, f64)>>,
    pub series_name: String,
    pub highlight: Option<(f64, f64)>,
}

impl ChartModel {
    pub fn build(state: &DashboardState, width: u16) -> Self {
        let series = state.series();
        let domain = x_domain(series);
        let max_labels = usize::from((width / YEAR_LABEL_WIDTH).max(2));

        let segments = plottable_segments(series)
            .iter()
            .map(|segment| monotone::smooth(segment, monotone::DEFAULT_SAMPLES))
            .collect();

        Self {
            x_domain: domain,
            x_grid: ticks_in_domain(domain, &x_ticks()),
            x_labels: axis_labels(domain, max_labels),
            y: y_scale(series, Y_TICK_COUNT),
            segments,
            series_name: state.series_label(),
            highlight: state.cursor_point().and_then(|p| p.coords()),
        }
    }

    /// Approximate plotting rectangle inside a chart drawn in `area`:
    /// the block border, the value labels on the left and the year labels
    /// plus axis line at the bottom are excluded
    pub fn plot_area(&self, area: Rect) -> Rect {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        let label_width = self
            .y
            .ticks
            .iter()
            .map(|t| format_large_number(*t).chars().count())
            .max()
            .unwrap_or(1) as u16
            + 1;

        Rect {
            x: inner.x + label_width.min(inner.width),
            y: inner.y,
            width: inner.width.saturating_sub(label_width),
            height: inner.height.saturating_sub(2),
        }
    }

    /// Year under a terminal column of the plot area
    pub fn year_at(&self, plot: Rect, column: u16) -> Option<f64> {
        if plot.width < 2 || column < plot.x || column >= plot.right() {
            return None;
        }
        let fraction = f64::from(column - plot.x) / f64::from(plot.width - 1);
        Some(self.x_domain.0 + fraction * (self.x_domain.1 - self.x_domain.0))
    }
}

pub fn render_chart(f: &mut Frame, area: Rect, model: &ChartModel) {
    let (lower, upper) = (model.y.lower, model.y.upper);
    let (left, right) = model.x_domain;

    let vertical_grid: Vec<[(f64, f64); 2]> =
        model.x_grid.iter().map(|x| [(*x, lower), (*x, upper)]).collect();
    let horizontal_grid: Vec<[(f64, f64); 2]> =
        model.y.ticks.iter().map(|y| [(left, *y), (right, *y)]).collect();
    let highlight: Vec<(f64, f64)> = model.highlight.into_iter().collect();

    let grid_style = Style::default().fg(Color::DarkGray);
    let series_style = Style::default().fg(SERIES_COLOR);

    let mut datasets: Vec<Dataset> = vertical_grid
        .iter()
        .chain(horizontal_grid.iter())
        .map(|line| {
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Line)
                .style(grid_style)
                .data(&line[..])
        })
        .collect();

    // The legend lists named datasets only, so the name rides on the first
    // segment, or on an empty dataset when there is nothing to draw
    if model.segments.is_empty() {
        datasets.push(
            Dataset::default()
                .name(model.series_name.clone())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(series_style)
                .data(&[]),
        );
    }
    for (i, segment) in model.segments.iter().enumerate() {
        let graph_type = if segment.len() == 1 {
            GraphType::Scatter
        } else {
            GraphType::Line
        };
        let mut dataset = Dataset::default()
            .marker(Marker::Braille)
            .graph_type(graph_type)
            .style(series_style)
            .data(segment);
        if i == 0 {
            dataset = dataset.name(model.series_name.clone());
        }
        datasets.push(dataset);
    }

    datasets.push(
        Dataset::default()
            .marker(Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Yellow))
            .data(&highlight),
    );

    let x_labels: Vec<Span> = model
        .x_labels
        .iter()
        .map(|x| Span::raw(format_year(*x)))
        .collect();
    let y_labels: Vec<Span> = model
        .y
        .ticks
        .iter()
        .map(|y| Span::raw(format_large_number(*y)))
        .collect();

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title("📈 Chart"))
        .x_axis(
            Axis::default()
                .title("year")
                .style(Style::default().fg(Color::Gray))
                .bounds([left, right])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("value")
                .style(Style::default().fg(Color::Gray))
                .bounds([lower, upper])
                .labels(y_labels),
        )
        .legend_position(Some(LegendPosition::TopRight))
        .hidden_legend_constraints((Constraint::Ratio(1, 1), Constraint::Ratio(1, 1)));

    f.render_widget(chart, area);
}

/// Year and value of the point under the cursor
pub fn render_tooltip(f: &mut Frame, area: Rect, state: &DashboardState) {
    let line = match state.cursor_point() {
        Some(point) => {
            let year = point.year.map_or_else(|| "-".to_string(), format_year);
            let value = point
                .value
                .filter(|v| v.is_finite())
                .map_or_else(|| "-".to_string(), |v| format_decimal(v, 4));
            Line::from(vec![
                Span::styled(year, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(
                    format!("{}: {}", state.series_label(), value),
                    Style::default().fg(SERIES_COLOR),
                ),
            ])
        }
        None => Line::from(Span::styled(
            "Hover over the chart or use ←/→ to inspect a year",
            Style::default().fg(Color::Gray),
        )),
    };

    let tooltip = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Tooltip"));
    f.render_widget(tooltip, area);
}
