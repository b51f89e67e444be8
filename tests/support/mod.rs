#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use shiftdeskd::api::{
    ApiError, DayBuckets, DayRoster, ManagerCount, MonthEntry, RosterEntry, Shift, ShiftApi,
    WeekRef,
};
use shiftdeskd::ipc::{self, AppState, Request};

/// Scripted stand-in for the backend. Mutations append to / remove from the
/// per-day rosters so a re-fetch after a successful add sees the new row,
/// and every call is logged for request-shape assertions.
#[derive(Default)]
pub struct ScriptedApi {
    pub weeks: Vec<WeekRef>,
    pub overview: BTreeMap<String, DayBuckets>,
    pub rosters: RefCell<BTreeMap<String, DayRoster>>,
    pub month_entries: Vec<MonthEntry>,
    pub per_manager: BTreeMap<String, Vec<ManagerCount>>,
    pub fail_add: RefCell<Option<ApiError>>,
    pub fail_delete: RefCell<Option<ApiError>>,
    pub calls: RefCell<Vec<String>>,
}

impl ScriptedApi {
    fn log(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    pub fn posts(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with("POST"))
            .cloned()
            .collect()
    }
}

impl ShiftApi for ScriptedApi {
    fn list_weeks(&self) -> Result<Vec<WeekRef>, ApiError> {
        self.log("GET /api/weeks".to_string());
        Ok(self.weeks.clone())
    }

    fn week_overview(&self, week_start: &str) -> Result<BTreeMap<String, DayBuckets>, ApiError> {
        self.log(format!("GET /api/entries?week_start={week_start}"));
        Ok(self.overview.clone())
    }

    fn day_roster(&self, week_start: &str, day: &str) -> Result<DayRoster, ApiError> {
        self.log(format!("GET /api/entries?week_start={week_start}&day={day}"));
        Ok(self.rosters.borrow().get(day).cloned().unwrap_or_default())
    }

    fn month_entries(&self, month: u32) -> Result<Vec<MonthEntry>, ApiError> {
        self.log(format!("GET /api/entries?month={month}"));
        Ok(self.month_entries.clone())
    }

    fn quarter_summary(
        &self,
        quarter: u32,
        year: i32,
    ) -> Result<BTreeMap<String, Vec<ManagerCount>>, ApiError> {
        self.log(format!("GET /api/summary/quarter?q={quarter}&year={year}"));
        Ok(self.per_manager.clone())
    }

    fn add_entry(&self, login: &str, work_date: &str, shift: Shift) -> Result<(), ApiError> {
        self.log(format!(
            "POST /api/entries {login} {work_date} {}",
            shift.as_str()
        ));
        if let Some(e) = self.fail_add.borrow().clone() {
            return Err(e);
        }
        let mut rosters = self.rosters.borrow_mut();
        let roster = rosters.entry(work_date.to_string()).or_default();
        let entry = RosterEntry {
            login: login.to_string(),
            name: None,
            shift_pattern: None,
        };
        match shift {
            Shift::Day => roster.day_shift.push(entry),
            Shift::Night => roster.night_shift.push(entry),
        }
        Ok(())
    }

    fn delete_entry(&self, login: &str, work_date: &str, shift: Shift) -> Result<(), ApiError> {
        self.log(format!(
            "POST /api/entries/delete {login} {work_date} {}",
            shift.as_str()
        ));
        if let Some(e) = self.fail_delete.borrow().clone() {
            return Err(e);
        }
        let mut rosters = self.rosters.borrow_mut();
        if let Some(roster) = rosters.get_mut(work_date) {
            let rows = match shift {
                Shift::Day => &mut roster.day_shift,
                Shift::Night => &mut roster.night_shift,
            };
            if let Some(idx) = rows.iter().position(|r| r.login == login) {
                rows.remove(idx);
            }
        }
        Ok(())
    }
}

/// Shared handle so a test keeps inspecting the same scripted backend the
/// state owns.
pub struct SharedApi(Rc<ScriptedApi>);

impl ShiftApi for SharedApi {
    fn list_weeks(&self) -> Result<Vec<WeekRef>, ApiError> {
        self.0.list_weeks()
    }
    fn week_overview(&self, week_start: &str) -> Result<BTreeMap<String, DayBuckets>, ApiError> {
        self.0.week_overview(week_start)
    }
    fn day_roster(&self, week_start: &str, day: &str) -> Result<DayRoster, ApiError> {
        self.0.day_roster(week_start, day)
    }
    fn month_entries(&self, month: u32) -> Result<Vec<MonthEntry>, ApiError> {
        self.0.month_entries(month)
    }
    fn quarter_summary(
        &self,
        quarter: u32,
        year: i32,
    ) -> Result<BTreeMap<String, Vec<ManagerCount>>, ApiError> {
        self.0.quarter_summary(quarter, year)
    }
    fn add_entry(&self, login: &str, work_date: &str, shift: Shift) -> Result<(), ApiError> {
        self.0.add_entry(login, work_date, shift)
    }
    fn delete_entry(&self, login: &str, work_date: &str, shift: Shift) -> Result<(), ApiError> {
        self.0.delete_entry(login, work_date, shift)
    }
}

pub fn state_with(api: &Rc<ScriptedApi>) -> AppState {
    let mut state = AppState::new();
    state.api = Some(Box::new(SharedApi(api.clone())));
    state
}

pub fn request(
    state: &mut AppState,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    ipc::handle_request(
        state,
        Request {
            id: id.to_string(),
            method: method.to_string(),
            params,
        },
    )
}

pub fn request_ok(
    state: &mut AppState,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(state, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_default()
}

pub fn request_err(
    state: &mut AppState,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(state, id, method, params);
    assert!(
        !value.get("ok").and_then(|v| v.as_bool()).unwrap_or(true),
        "{} unexpectedly succeeded: {}",
        method,
        value
    );
    value.get("error").cloned().unwrap_or_default()
}

pub fn entry(login: &str) -> RosterEntry {
    RosterEntry {
        login: login.to_string(),
        name: None,
        shift_pattern: None,
    }
}

pub fn roster(day_logins: &[&str], night_logins: &[&str]) -> DayRoster {
    DayRoster {
        day_shift: day_logins.iter().map(|l| entry(l)).collect(),
        night_shift: night_logins.iter().map(|l| entry(l)).collect(),
    }
}
