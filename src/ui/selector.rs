use crossterm::event::{KeyCode, KeyEvent};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use ratatui::widgets::ListState;

use crate::models::{regions, Region, REGIONS};

/// What a key press inside the dropdown asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorAction {
    None,
    Close,
    Choose(u32),
}

/// Dropdown listing the 25 regions, filterable by typing
pub struct RegionSelector {
    open: bool,
    query: String,
    matches: Vec<&'static Region>,
    list_state: ListState,
    matcher: SkimMatcherV2,
}

impl Default for RegionSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Accent-free lowercase form so "ancash" finds "Áncash"
fn fold_accents(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            'á' | 'Á' => 'a',
            'é' | 'É' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'Ó' => 'o',
            'ú' | 'Ú' => 'u',
            'ñ' | 'Ñ' => 'n',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

impl RegionSelector {
    pub fn new() -> Self {
        Self {
            open: false,
            query: String::new(),
            matches: REGIONS.iter().collect(),
            list_state: ListState::default(),
            matcher: SkimMatcherV2::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open with the full list and the current region highlighted
    pub fn open(&mut self, current: u32) {
        self.open = true;
        self.query.clear();
        self.refilter();
        let index = regions::region_index(current).unwrap_or(0);
        self.list_state.select(Some(index));
    }

    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Regions shown in the list, always in table order
    pub fn matches(&self) -> &[&'static Region] {
        &self.matches
    }

    pub fn list_state_mut(&mut self) -> &mut ListState {
        &mut self.list_state
    }

    pub fn highlighted(&self) -> Option<&'static Region> {
        self.list_state.selected().and_then(|i| self.matches.get(i).copied())
    }

    fn refilter(&mut self) {
        let pattern = fold_accents(&self.query);
        self.matches = if pattern.is_empty() {
            REGIONS.iter().collect()
        } else {
            REGIONS
                .iter()
                .filter(|r| self.matcher.fuzzy_match(&fold_accents(r.name), &pattern).is_some())
                .collect()
        };
        self.list_state
            .select(if self.matches.is_empty() { None } else { Some(0) });
    }

    pub fn next(&mut self) {
        if self.matches.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.matches.len() => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.matches.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.matches.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> SelectorAction {
        match key.code {
            KeyCode::Esc => {
                self.close();
                SelectorAction::Close
            }
            KeyCode::Enter => match self.highlighted() {
                Some(region) => {
                    let code = region.code;
                    self.close();
                    SelectorAction::Choose(code)
                }
                None => SelectorAction::None,
            },
            KeyCode::Down => {
                self.next();
                SelectorAction::None
            }
            KeyCode::Up => {
                self.previous();
                SelectorAction::None
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.refilter();
                SelectorAction::None
            }
            KeyCode::Char(c) => {
                self.query.push(c);
                self.refilter();
                SelectorAction::None
            }
            _ => SelectorAction::None,
        }
    }
}
