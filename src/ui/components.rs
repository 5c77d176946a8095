/// UI components and formatting helpers for the dashboard
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Line colour of the series
pub const SERIES_COLOR: Color = Color::Rgb(0x88, 0x84, 0xd8);

/// Centered rectangle of the given width percentage and fixed height
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x.min(100)) / 2),
            Constraint::Percentage(percent_x.min(100)),
            Constraint::Min(0),
        ])
        .split(vertical[1])[1]
}

/// Render a loading indicator
pub fn render_loading_indicator(f: &mut Frame, area: Rect, message: &str) {
    let popup = centered_rect(40, 3, area);
    let loading = Paragraph::new(message)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Loading"))
        .style(Style::default().fg(Color::Yellow));

    f.render_widget(Clear, popup);
    f.render_widget(loading, popup);
}

/// Render error message
pub fn render_error(f: &mut Frame, area: Rect, error: &str) {
    let popup = centered_rect(60, 6, area);
    let error_paragraph = Paragraph::new(vec![
        Line::from(Span::styled(
            "Failed to load data",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(error.to_string()),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title("Error"))
    .style(Style::default().fg(Color::Red));

    f.render_widget(Clear, popup);
    f.render_widget(error_paragraph, popup);
}

/// Render an informational notice over the chart
pub fn render_notice(f: &mut Frame, area: Rect, notice: &str) {
    let popup = centered_rect(50, 3, area);
    let paragraph = Paragraph::new(notice)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray));

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

/// Magnitude from which numbers switch to scientific notation
const SCIENTIFIC_ABOVE: f64 = 1e15;
/// Non-zero values below this would print as 0 with two decimals
const SCIENTIFIC_BELOW: f64 = 0.005;

/// Format large numbers with a magnitude suffix
pub fn format_large_number(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    if abs >= SCIENTIFIC_ABOVE || (abs > 0.0 && abs < SCIENTIFIC_BELOW) {
        format!("{}{:.1e}", sign, abs)
    } else if abs >= 1_000_000_000_000.0 {
        format!("{}{:.1}T", sign, abs / 1_000_000_000_000.0)
    } else if abs >= 1_000_000_000.0 {
        format!("{}{:.1}B", sign, abs / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("{}{:.1}M", sign, abs / 1_000_000.0)
    } else if abs >= 10_000.0 {
        format!("{}{:.1}K", sign, abs / 1_000.0)
    } else {
        format_decimal(value, 2)
    }
}

/// Up to `max_decimals` decimals, trailing zeros dropped
pub fn format_decimal(value: f64, max_decimals: usize) -> String {
    let text = format!("{:.*}", max_decimals, value);
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    };
    if text == "-0" {
        "0".to_string()
    } else {
        text
    }
}

/// Years print without decimals when whole
pub fn format_year(year: f64) -> String {
    if year.abs() >= SCIENTIFIC_ABOVE {
        format!("{:.1e}", year)
    } else if year.fract() == 0.0 {
        format!("{:.0}", year)
    } else {
        format_decimal(year, 1)
    }
}

/// Key hint span pair in the status bar style
pub fn key_hint<'a>(key: &'a str, action: &'a str, color: Color) -> Vec<Span<'a>> {
    vec![
        Span::styled(key, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(action, Style::default().fg(Color::Gray)),
    ]
}
