use tracing::{debug, info, warn};

use crate::analysis::derive_series;
use crate::analysis::scale::{FIRST_YEAR, LAST_YEAR};
use crate::api::LoadOutcome;
use crate::models::{regions, DataSet, SeriesPoint};

/// Where the one-shot load stands
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Loaded { rows: usize, malformed: usize },
    Failed(String),
}

/// Everything the dashboard shows: the dataset, the selected region, the
/// series derived from both, and the tooltip cursor
#[derive(Debug, Clone)]
pub struct DashboardState {
    dataset: DataSet,
    load_state: LoadState,
    selection: u32,
    series: Vec<SeriesPoint>,
    cursor: Option<usize>,
}

impl DashboardState {
    pub fn new(selection: u32) -> Self {
        Self {
            dataset: DataSet::default(),
            load_state: LoadState::Loading,
            selection,
            series: Vec::new(),
            cursor: None,
        }
    }

    /// Store the load result. The dataset is written once; later outcomes
    /// are ignored and `false` is returned.
    pub fn apply_load(&mut self, outcome: LoadOutcome) -> bool {
        if self.load_state != LoadState::Loading {
            warn!("Ignoring second load result; dataset is loaded once per session");
            return false;
        }

        match outcome {
            Ok(loaded) => {
                info!(
                    "📊 Dataset ready: {} rows, {} malformed",
                    loaded.dataset.len(),
                    loaded.issues.len()
                );
                self.load_state = LoadState::Loaded {
                    rows: loaded.dataset.len(),
                    malformed: loaded.issues.len(),
                };
                self.dataset = loaded.dataset;
            }
            Err(e) => {
                warn!("❌ Failed to load data: {}", e);
                self.load_state = LoadState::Failed(e.to_string());
            }
        }

        self.recompute_series();
        true
    }

    /// Change the selected region. Codes outside the table are accepted and
    /// simply match nothing.
    pub fn select_region(&mut self, code: u32) {
        if code == self.selection {
            return;
        }
        debug!("Selection {} -> {}", self.selection, code);
        self.selection = code;
        self.recompute_series();
    }

    fn recompute_series(&mut self) {
        self.series = derive_series(&self.dataset, self.selection);
        self.cursor = None;
    }

    pub fn selection(&self) -> u32 {
        self.selection
    }

    pub fn selection_name(&self) -> String {
        match regions::region_name(self.selection) {
            Some(name) => name.to_string(),
            None => format!("Region {}", self.selection),
        }
    }

    /// Legend label for the line series
    pub fn series_label(&self) -> String {
        format!("{} Value", self.selection_name())
    }

    pub fn series(&self) -> &[SeriesPoint] {
        &self.series
    }

    pub fn dataset(&self) -> &DataSet {
        &self.dataset
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// Loaded, but nothing plottable for the selected region
    pub fn has_no_data(&self) -> bool {
        matches!(self.load_state, LoadState::Loaded { .. })
            && self.series.iter().all(|p| p.coords().is_none())
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn cursor_point(&self) -> Option<&SeriesPoint> {
        self.cursor.and_then(|i| self.series.get(i))
    }

    /// Step the tooltip cursor; the first step lands on an end point
    pub fn move_cursor(&mut self, delta: isize) {
        if self.series.is_empty() {
            return;
        }
        let last = self.series.len() - 1;
        self.cursor = Some(match self.cursor {
            None if delta < 0 => last,
            None => 0,
            Some(i) => (i as isize + delta).clamp(0, last as isize) as usize,
        });
    }

    pub fn cursor_home(&mut self) {
        if !self.series.is_empty() {
            self.cursor = Some(0);
        }
    }

    pub fn cursor_end(&mut self) {
        if !self.series.is_empty() {
            self.cursor = Some(self.series.len() - 1);
        }
    }

    pub fn clear_cursor(&mut self) {
        self.cursor = None;
    }

    /// Put the cursor on the point whose year is nearest to `year`
    pub fn hover_year(&mut self, year: f64) {
        let nearest = self
            .series
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.year.filter(|y| y.is_finite()).map(|y| (i, (y - year).abs())))
            .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
                Some((_, best_d)) if best_d <= d => best,
                _ => Some((i, d)),
            });
        self.cursor = nearest.map(|(i, _)| i);
    }

    /// One-line description of the current state for the status bar
    pub fn status_text(&self) -> String {
        match &self.load_state {
            LoadState::Loading => "Loading data...".to_string(),
            LoadState::Failed(message) => format!("Failed to load data: {}", message),
            LoadState::Loaded { .. } if self.has_no_data() => format!(
                "No data for {} in {}-{}",
                self.selection_name(),
                FIRST_YEAR,
                LAST_YEAR
            ),
            LoadState::Loaded { rows, malformed } => {
                let mut text = format!(
                    "Loaded {} rows · {}: {} points",
                    rows,
                    self.selection_name(),
                    self.series.len()
                );
                if *malformed > 0 {
                    text.push_str(&format!(" ({} malformed rows)", malformed));
                }
                text
            }
        }
    }
}
