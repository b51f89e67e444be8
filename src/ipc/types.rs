use serde::Deserialize;

use crate::api::{DayRoster, Shift, ShiftApi};

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryView {
    Month,
    Quarter,
}

impl SummaryView {
    pub fn as_str(self) -> &'static str {
        match self {
            SummaryView::Month => "month",
            SummaryView::Quarter => "quarter",
        }
    }
}

/// Row marked for deletion via double-click, awaiting the Delete key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmedRow {
    pub shift: Shift,
    pub login: String,
}

/// Quarter-view bounds. The defaults mirror the shipped UI; `ui.configure`
/// can override both without touching the render path.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub managers: Vec<String>,
    pub quarter_row_cap: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            managers: ["Paweł", "Michał", "Mariia", "Aleksy", "Piotr", "Daria"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            quarter_row_cap: 5,
        }
    }
}

/// The page-session selection state, held here instead of in page globals so
/// handlers and tests get an explicit, injectable object.
#[derive(Debug, Default)]
pub struct ViewState {
    pub selected_week_start: Option<String>,
    pub selected_day: Option<String>,
    pub active_shift: Option<Shift>,
    pub armed_row: Option<ArmedRow>,
    pub selected_month: Option<u32>,
    pub selected_quarter: Option<u32>,
    pub summary_view: Option<SummaryView>,
    /// Bumped on every selection change; render payloads carry it so a
    /// pipelining shell can drop paints for superseded selections.
    pub generation: u64,
    /// Last fetched rosters for the selected day. The rendered rows are the
    /// source of truth for shift counts and delete-time row removal.
    pub day_roster: Option<DayRoster>,
}

impl ViewState {
    pub fn bump(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }
}

pub struct AppState {
    pub api: Option<Box<dyn ShiftApi>>,
    pub backend_url: Option<String>,
    pub view: ViewState,
    pub config: ViewConfig,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            api: None,
            backend_url: None,
            view: ViewState::default(),
            config: ViewConfig::default(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        AppState::new()
    }
}
