//! Loading the dataset from files and over HTTP

use assert_matches::assert_matches;
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use test_log::test;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{fixtures, logging};
use peru_dashboard::api::{self, DataSource, FileSource, LoadError};
use peru_dashboard::models::{parse_base_url, Config, SeriesPoint};
use peru_dashboard::ui::events::{EventManager, TuiEvent};
use peru_dashboard::ui::DashboardState;

fn config_for(source: &str, base_url: Option<&str>) -> Config {
    Config {
        source: source.to_string(),
        base_url: base_url.map(|raw| parse_base_url(raw).unwrap()),
        ..Config::default()
    }
}

/// Serves fixed text and counts how often it was asked for
struct CountingSource {
    text: &'static str,
    fetches: Arc<AtomicUsize>,
}

#[async_trait]
impl DataSource for CountingSource {
    fn describe(&self) -> String {
        "counting".to_string()
    }

    async fn fetch_text(&self) -> Result<String, LoadError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.text.to_string())
    }
}

#[test(tokio::test)]
async fn test_load_from_local_file() {
    logging::init_test_logging();
    logging::log_test_step("Loading CSV from a temporary file");

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(fixtures::SAMPLE_CSV.as_bytes()).unwrap();

    let config = config_for(file.path().to_str().unwrap(), None);
    let source = api::source_for(&config).unwrap();
    let loaded = api::load(source.as_ref()).await.unwrap();

    assert_eq!(loaded.dataset.len(), 6);
    assert!(loaded.issues.is_empty());
}

#[test(tokio::test)]
async fn test_missing_file_is_io_error() {
    let source = FileSource::new("/definitely/not/here/input.csv");
    let result = api::load(&source).await;

    assert_matches!(result, Err(LoadError::Io { path, .. }) if path.ends_with("input.csv"));
}

#[test(tokio::test)]
async fn test_missing_required_column_fails_load() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"department,year\n1,1997\n").unwrap();

    let result = api::load(&FileSource::new(file.path())).await;

    assert_matches!(result, Err(LoadError::MissingColumn(columns)) if columns == vec!["y_HH".to_string()]);
}

#[test(tokio::test)]
async fn test_load_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/input.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(fixtures::SAMPLE_CSV))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/data/input.csv", server.uri());
    let source = api::source_for(&config_for(&url, None)).unwrap();
    let loaded = api::load(source.as_ref()).await.unwrap();

    assert_eq!(loaded.dataset.len(), 6);
}

#[test(tokio::test)]
async fn test_relative_source_resolves_against_base_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app/input.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(fixtures::SAMPLE_CSV))
        .expect(1)
        .mount(&server)
        .await;

    let base = format!("{}/app/", server.uri());
    let source = api::source_for(&config_for("input.csv", Some(&base))).unwrap();
    assert_eq!(source.describe(), format!("{}/app/input.csv", server.uri()));

    let loaded = api::load(source.as_ref()).await.unwrap();
    assert_eq!(loaded.dataset.len(), 6);
}

#[test(tokio::test)]
async fn test_http_error_status_fails_load() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/input.csv", server.uri());
    let source = api::source_for(&config_for(&url, None)).unwrap();
    let result = api::load(source.as_ref()).await;

    assert_matches!(result, Err(LoadError::Status { status: 404, .. }));
}

#[test(tokio::test)]
async fn test_failed_load_reaches_state_as_failure() {
    let mut events = EventManager::new();
    events
        .spawn_load(Box::new(FileSource::new("/definitely/not/here/input.csv")))
        .await
        .unwrap();

    let mut state = DashboardState::new(1);
    match events.receive().await {
        Some(TuiEvent::DataLoaded(outcome)) => {
            state.apply_load(outcome);
        }
        other => panic!("unexpected event: {:?}", other),
    }

    assert!(state.status_text().starts_with("Failed to load data:"));
    assert!(state.series().is_empty());
}

#[test(tokio::test)]
async fn test_selection_changes_do_not_refetch() {
    let fetches = Arc::new(AtomicUsize::new(0));
    let source = CountingSource {
        text: "department,year,y_HH\n1,1997,10\n2,1997,20\n",
        fetches: Arc::clone(&fetches),
    };

    let mut events = EventManager::new();
    events.spawn_load(Box::new(source)).await.unwrap();

    let mut state = DashboardState::new(1);
    if let Some(TuiEvent::DataLoaded(outcome)) = events.receive().await {
        state.apply_load(outcome);
    }

    assert_eq!(state.series(), &[SeriesPoint::new(1997.0, 10.0)]);
    state.select_region(2);
    assert_eq!(state.series(), &[SeriesPoint::new(1997.0, 20.0)]);
    state.select_region(1);

    assert_eq!(fetches.load(Ordering::SeqCst), 1);
}
