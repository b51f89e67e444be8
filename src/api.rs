use std::collections::BTreeMap;
use std::fmt;

use reqwest::blocking::{Client, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    Day,
    Night,
}

impl Shift {
    pub fn as_str(self) -> &'static str {
        match self {
            Shift::Day => "day",
            Shift::Night => "night",
        }
    }

    pub fn parse(s: &str) -> Option<Shift> {
        match s {
            "day" => Some(Shift::Day),
            "night" => Some(Shift::Night),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeekRef {
    pub start: String,
}

/// One date's buckets in the week overview. Elements stay opaque; the week
/// table only consumes the head-counts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DayBuckets {
    #[serde(default)]
    pub day_shift: Vec<serde_json::Value>,
    #[serde(default)]
    pub night_shift: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub shift_pattern: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DayRoster {
    #[serde(default)]
    pub day_shift: Vec<RosterEntry>,
    #[serde(default)]
    pub night_shift: Vec<RosterEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonthEntry {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    pub work_date: String,
    pub shift: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManagerCount {
    pub login: String,
    pub count: i64,
}

/// Failure taxonomy for backend calls. `Rejected` carries the body's `error`
/// field when the backend supplied one; the caller picks the fallback text.
#[derive(Debug, Clone)]
pub enum ApiError {
    Rejected { status: u16, message: Option<String> },
    Transport(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Rejected { status, message } => match message {
                Some(m) => write!(f, "backend rejected request ({status}): {m}"),
                None => write!(f, "backend rejected request ({status})"),
            },
            ApiError::Transport(m) => write!(f, "backend unreachable: {m}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Seam between the view handlers and the scheduling backend. Handlers and
/// scenario tests depend on this trait, never on the HTTP client.
pub trait ShiftApi {
    fn list_weeks(&self) -> Result<Vec<WeekRef>, ApiError>;
    fn week_overview(&self, week_start: &str) -> Result<BTreeMap<String, DayBuckets>, ApiError>;
    fn day_roster(&self, week_start: &str, day: &str) -> Result<DayRoster, ApiError>;
    fn month_entries(&self, month: u32) -> Result<Vec<MonthEntry>, ApiError>;
    fn quarter_summary(
        &self,
        quarter: u32,
        year: i32,
    ) -> Result<BTreeMap<String, Vec<ManagerCount>>, ApiError>;
    fn add_entry(&self, login: &str, work_date: &str, shift: Shift) -> Result<(), ApiError>;
    fn delete_entry(&self, login: &str, work_date: &str, shift: Shift) -> Result<(), ApiError>;
}

#[derive(Debug, Deserialize)]
struct WeekOverviewBody {
    #[serde(default)]
    per_day: BTreeMap<String, DayBuckets>,
}

#[derive(Debug, Deserialize)]
struct MonthEntriesBody {
    #[serde(default)]
    entries: Vec<MonthEntry>,
}

#[derive(Debug, Deserialize)]
struct QuarterSummaryBody {
    #[serde(default)]
    per_manager: BTreeMap<String, Vec<ManagerCount>>,
}

pub struct HttpShiftApi {
    base: Url,
    client: Client,
}

impl HttpShiftApi {
    /// No request timeout is configured; a hung backend leaves the affected
    /// view region stale, which is the documented behavior.
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base = Url::parse(base_url)?;
        let client = Client::builder().build()?;
        Ok(HttpShiftApi { base, client })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    // Covers both url::ParseError and reqwest::Error.
    fn transport(e: impl fmt::Display) -> ApiError {
        ApiError::Transport(e.to_string())
    }

    fn rejected(resp: Response) -> ApiError {
        let status = resp.status().as_u16();
        let message = resp
            .json::<serde_json::Value>()
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string));
        ApiError::Rejected { status, message }
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.base.join(path).map_err(Self::transport)?;
        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(Self::transport)?;
        if !resp.status().is_success() {
            return Err(Self::rejected(resp));
        }
        resp.json().map_err(Self::transport)
    }

    fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<(), ApiError> {
        let url = self.base.join(path).map_err(Self::transport)?;
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .map_err(Self::transport)?;
        if !resp.status().is_success() {
            return Err(Self::rejected(resp));
        }
        Ok(())
    }
}

impl ShiftApi for HttpShiftApi {
    fn list_weeks(&self) -> Result<Vec<WeekRef>, ApiError> {
        self.get_json("/api/weeks", &[])
    }

    fn week_overview(&self, week_start: &str) -> Result<BTreeMap<String, DayBuckets>, ApiError> {
        let body: WeekOverviewBody =
            self.get_json("/api/entries", &[("week_start", week_start.to_string())])?;
        Ok(body.per_day)
    }

    fn day_roster(&self, week_start: &str, day: &str) -> Result<DayRoster, ApiError> {
        self.get_json(
            "/api/entries",
            &[
                ("week_start", week_start.to_string()),
                ("day", day.to_string()),
            ],
        )
    }

    fn month_entries(&self, month: u32) -> Result<Vec<MonthEntry>, ApiError> {
        // No year parameter by design of the wire contract; see DESIGN.md.
        let body: MonthEntriesBody =
            self.get_json("/api/entries", &[("month", month.to_string())])?;
        Ok(body.entries)
    }

    fn quarter_summary(
        &self,
        quarter: u32,
        year: i32,
    ) -> Result<BTreeMap<String, Vec<ManagerCount>>, ApiError> {
        let body: QuarterSummaryBody = self.get_json(
            "/api/summary/quarter",
            &[("q", quarter.to_string()), ("year", year.to_string())],
        )?;
        Ok(body.per_manager)
    }

    fn add_entry(&self, login: &str, work_date: &str, shift: Shift) -> Result<(), ApiError> {
        self.post_json(
            "/api/entries",
            &json!({
                "login": login,
                "work_date": work_date,
                "shift": shift.as_str(),
            }),
        )
    }

    fn delete_entry(&self, login: &str, work_date: &str, shift: Shift) -> Result<(), ApiError> {
        self.post_json(
            "/api/entries/delete",
            &json!({
                "login": login,
                "work_date": work_date,
                "shift": shift.as_str(),
            }),
        )
    }
}
