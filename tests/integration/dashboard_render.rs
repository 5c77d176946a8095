//! Full-screen rendering of the dashboard against a test backend

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use test_log::test;

use crate::common::{fixtures, logging};
use peru_dashboard::api::{LoadError, LoadedData};
use peru_dashboard::ui::app::TITLE;
use peru_dashboard::ui::events::TuiEvent;
use peru_dashboard::ui::DashboardApp;

fn screen(app: &mut DashboardApp, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| app.draw(f)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

fn press(app: &mut DashboardApp, code: KeyCode) {
    app.handle_event(TuiEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)));
}

fn loaded_app(region: u32) -> DashboardApp {
    let mut app = DashboardApp::new(region, "input.csv");
    app.handle_event(TuiEvent::DataLoaded(Ok(LoadedData {
        dataset: fixtures::sample_dataset(),
        issues: Vec::new(),
    })));
    app
}

#[test]
fn test_dashboard_shows_title_selector_and_series() {
    logging::init_test_logging();
    logging::log_test_step("Rendering loaded dashboard");

    let mut app = loaded_app(1);
    let text = screen(&mut app, 120, 36);

    assert!(text.contains(TITLE));
    assert!(text.contains("Select Region:"));
    assert!(text.contains("Amazonas"));
    assert!(text.contains("Amazonas Value"));
}

#[test]
fn test_choosing_a_region_updates_legend() {
    let mut app = loaded_app(1);

    press(&mut app, KeyCode::Enter);
    for c in "lima".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    press(&mut app, KeyCode::Enter);

    let text = screen(&mut app, 120, 36);
    assert!(text.contains("Lima Value"));
    assert!(text.contains("Lima: 2 points"));
}

#[test]
fn test_region_without_data_shows_notice() {
    let mut app = loaded_app(7);
    let text = screen(&mut app, 120, 36);

    assert!(text.contains("No data for Callao in 1997-2020"));
    assert!(text.contains("Callao Value"));
}

#[test]
fn test_failed_load_renders_error_panel() {
    let mut app = DashboardApp::new(1, "input.csv");
    app.handle_event(TuiEvent::DataLoaded(Err(LoadError::Status {
        url: "http://localhost/input.csv".to_string(),
        status: 500,
    })));

    let text = screen(&mut app, 120, 36);
    assert!(text.contains("Error"));
    assert!(text.contains("Failed to load data"));
    assert!(text.contains("Select Region:"));
}

#[test]
fn test_small_terminal_still_renders() {
    let mut app = loaded_app(1);
    let text = screen(&mut app, 40, 20);

    assert!(text.contains("Select Region:"));
}
