use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};
use std::time::Duration;
use tracing::{debug, info};

use super::chart::{render_chart, render_tooltip, ChartModel};
use super::components::{
    key_hint, render_error, render_loading_indicator, render_notice, SERIES_COLOR,
};
use super::events::{poll_terminal, EventManager, TuiEvent};
use super::layout::DashboardLayout;
use super::selector::{RegionSelector, SelectorAction};
use super::state::{DashboardState, LoadState};
use super::{install_panic_hook, restore_terminal, setup_terminal, DashboardTerminal};
use crate::api;
use crate::models::{regions, Config, REGIONS};

pub const TITLE: &str = "Peru Regional Time Series (1997-2020)";

const TICK_RATE: Duration = Duration::from_millis(100);

/// Single-screen dashboard: region selector above a line chart
pub struct DashboardApp {
    pub state: DashboardState,
    pub selector: RegionSelector,
    pub should_quit: bool,
    source_label: String,
    layout: Option<DashboardLayout>,
    chart: Option<(ChartModel, Rect)>,
}

impl DashboardApp {
    pub fn new(initial_region: u32, source_label: impl Into<String>) -> Self {
        Self {
            state: DashboardState::new(initial_region),
            selector: RegionSelector::new(),
            should_quit: false,
            source_label: source_label.into(),
            layout: None,
            chart: None,
        }
    }

    /// Plot rectangle of the last drawn frame
    pub fn plot_area(&self) -> Option<Rect> {
        self.chart.as_ref().map(|(_, plot)| *plot)
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let layout = DashboardLayout::new(f.area());

        self.render_title(f, layout.title);
        self.render_selector(f, layout.selector);

        let model = ChartModel::build(&self.state, layout.chart.width);
        render_chart(f, layout.chart, &model);
        let plot = model.plot_area(layout.chart);
        self.chart = Some((model, plot));

        match self.state.load_state() {
            LoadState::Loading => render_loading_indicator(
                f,
                layout.chart,
                &format!("Loading {}...", self.source_label),
            ),
            LoadState::Failed(message) => render_error(f, layout.chart, message),
            LoadState::Loaded { .. } if self.state.has_no_data() => {
                render_notice(f, layout.chart, &self.state.status_text())
            }
            LoadState::Loaded { .. } => {}
        }

        render_tooltip(f, layout.tooltip, &self.state);
        self.render_status_bar(f, layout.status_bar);

        if self.selector.is_open() {
            self.render_dropdown(f, &layout);
        }
        self.layout = Some(layout);
    }

    fn render_title(&self, f: &mut Frame, area: Rect) {
        let title = Paragraph::new(TITLE)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        f.render_widget(title, area);
    }

    fn render_selector(&self, f: &mut Frame, area: Rect) {
        let value_style = if self.selector.is_open() {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Yellow)
        };

        let line = Line::from(vec![
            Span::styled("Select Region: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!(" {} ▾ ", self.state.selection_name()), value_style),
        ]);
        let selector = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        f.render_widget(selector, area);
    }

    fn render_dropdown(&mut self, f: &mut Frame, layout: &DashboardLayout) {
        let area = layout.dropdown(self.selector.matches().len());
        f.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Regions")
            .style(Style::default().fg(Color::White));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let filter = Paragraph::new(Line::from(vec![
            Span::styled("Filter: ", Style::default().fg(Color::Gray)),
            Span::raw(self.selector.query().to_string()),
        ]));
        f.render_widget(filter, chunks[0]);

        if self.selector.matches().is_empty() {
            let empty = Paragraph::new("No matching region").style(Style::default().fg(Color::Red));
            f.render_widget(empty, chunks[1]);
            return;
        }

        let items: Vec<ListItem> = self
            .selector
            .matches()
            .iter()
            .map(|region| ListItem::new(format!("{:>2}  {}", region.code, region.name)))
            .collect();
        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .bg(SERIES_COLOR)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("→ ");

        f.render_stateful_widget(list, chunks[1], self.selector.list_state_mut());
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_color = match self.state.load_state() {
            LoadState::Loading => Color::Yellow,
            LoadState::Failed(_) => Color::Red,
            LoadState::Loaded { .. } if self.state.has_no_data() => Color::Gray,
            LoadState::Loaded { .. } => Color::Green,
        };

        let mut hints = vec![Span::raw(" ")];
        hints.extend(key_hint("Enter", " regions • ", Color::Yellow));
        hints.extend(key_hint("Tab", " next region • ", Color::Yellow));
        hints.extend(key_hint("←/→", " inspect • ", Color::Cyan));
        hints.extend(key_hint("Q", " quit ", Color::Red));

        let status = Paragraph::new(Span::styled(
            self.state.status_text(),
            Style::default().fg(status_color),
        ))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title_bottom(Line::from(hints)),
        );
        f.render_widget(status, area);
    }

    pub fn handle_event(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Key(key) => self.handle_key(key),
            TuiEvent::Mouse(mouse) => self.handle_mouse(mouse),
            TuiEvent::Resize(width, height) => debug!("Resized to {}x{}", width, height),
            TuiEvent::DataLoaded(outcome) => {
                self.state.apply_load(outcome);
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.selector.is_open() {
            if let SelectorAction::Choose(code) = self.selector.handle_key(key) {
                self.state.select_region(code);
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter | KeyCode::Char(' ') => self.selector.open(self.state.selection()),
            KeyCode::Tab => self.step_region(1),
            KeyCode::BackTab => self.step_region(-1),
            KeyCode::Left => self.state.move_cursor(-1),
            KeyCode::Right => self.state.move_cursor(1),
            KeyCode::Home => self.state.cursor_home(),
            KeyCode::End => self.state.cursor_end(),
            _ => {}
        }
    }

    /// Select the neighbouring region in table order, wrapping around
    fn step_region(&mut self, delta: isize) {
        let len = REGIONS.len() as isize;
        let index = regions::region_index(self.state.selection()).unwrap_or(0) as isize;
        let next = (index + delta).rem_euclid(len) as usize;
        self.state.select_region(REGIONS[next].code);
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let position = Position::new(mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let on_selector = self
                    .layout
                    .map_or(false, |layout| layout.selector.contains(position));
                if on_selector {
                    if self.selector.is_open() {
                        self.selector.close();
                    } else {
                        self.selector.open(self.state.selection());
                    }
                }
            }
            MouseEventKind::ScrollDown if self.selector.is_open() => self.selector.next(),
            MouseEventKind::ScrollUp if self.selector.is_open() => self.selector.previous(),
            MouseEventKind::Moved | MouseEventKind::Drag(_) if !self.selector.is_open() => {
                let Some((model, plot)) = &self.chart else {
                    return;
                };
                if !plot.contains(position) {
                    return;
                }
                if let Some(year) = model.year_at(*plot, mouse.column) {
                    self.state.hover_year(year);
                }
            }
            _ => {}
        }
    }
}

/// Run the dashboard until the user quits
pub async fn run_app(config: &Config) -> Result<()> {
    let source = api::source_for(config)?;
    let source_label = source.describe();
    info!("🚀 Starting dashboard with data from {}", source_label);

    let mut events = EventManager::new();
    let mut app = DashboardApp::new(config.initial_region, source_label);

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let _load = events.spawn_load(source);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    restore_terminal(&mut terminal)?;
    result
}

async fn run_loop(
    terminal: &mut DashboardTerminal,
    app: &mut DashboardApp,
    events: &mut EventManager,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.draw(f))?;

        if let Some(event) = poll_terminal(TICK_RATE)? {
            app.handle_event(event);
        }
        while let Some(event) = events.try_receive() {
            app.handle_event(event);
        }

        if app.should_quit {
            return Ok(());
        }
        tokio::task::yield_now().await;
    }
}
