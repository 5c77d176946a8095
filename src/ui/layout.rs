use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen regions of the dashboard, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    pub title: Rect,
    pub selector: Rect,
    pub chart: Rect,
    pub tooltip: Rect,
    pub status_bar: Rect,
}

impl DashboardLayout {
    /// Create a new layout from the given area
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Region selector
                Constraint::Min(8),    // Chart
                Constraint::Length(3), // Tooltip
                Constraint::Length(3), // Status bar
            ])
            .split(area);

        Self {
            title: chunks[0],
            selector: chunks[1],
            chart: chunks[2],
            tooltip: chunks[3],
            status_bar: chunks[4],
        }
    }

    /// Area for the open dropdown: under the selector, over the chart
    pub fn dropdown(&self, rows: usize) -> Rect {
        let wanted = rows as u16 + 3; // borders + filter line
        let available = self.chart.bottom().saturating_sub(self.selector.bottom());
        Rect {
            x: self.selector.x,
            y: self.selector.bottom(),
            width: self.selector.width.min(40),
            height: wanted.min(available),
        }
    }
}
