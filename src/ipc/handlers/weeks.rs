use std::collections::BTreeMap;

use serde_json::json;

use crate::api::DayBuckets;
use crate::calendar;
use crate::ipc::error::ok;
use crate::ipc::helpers::{api_err, get_required_str, require_api, HandlerErr};
use crate::ipc::types::{AppState, Request};

fn weeks_list(state: &AppState) -> Result<serde_json::Value, HandlerErr> {
    let api = require_api(&state.api)?;
    let weeks = api.list_weeks().map_err(|e| api_err(e, "Błąd"))?;
    let buttons: Vec<serde_json::Value> = weeks
        .iter()
        .map(|w| {
            json!({
                "start": w.start,
                "label": calendar::week_label(&w.start),
                "selected": state.view.selected_week_start.as_deref() == Some(w.start.as_str()),
            })
        })
        .collect();
    Ok(json!({ "weeks": buttons }))
}

/// Day-table rows for one week overview. Ordered by weekday index (Sunday
/// first), not by calendar date; unparseable dates go last and render raw.
fn day_table_rows(per_day: &BTreeMap<String, DayBuckets>) -> Vec<serde_json::Value> {
    let mut rows: Vec<(u32, serde_json::Value)> = per_day
        .iter()
        .map(|(date, buckets)| match calendar::parse_iso_date(date) {
            Some(d) => (
                calendar::weekday_index(d),
                json!({
                    "day": date,
                    "weekday": calendar::weekday_name_pl(d),
                    "date": calendar::format_date_dmy(d),
                    "dayCount": buckets.day_shift.len(),
                    "nightCount": buckets.night_shift.len(),
                }),
            ),
            None => (
                7,
                json!({
                    "day": date,
                    "weekday": "",
                    "date": date,
                    "dayCount": buckets.day_shift.len(),
                    "nightCount": buckets.night_shift.len(),
                }),
            ),
        })
        .collect();
    rows.sort_by_key(|(weekday, _)| *weekday);
    rows.into_iter().map(|(_, row)| row).collect()
}

fn week_select(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let start = get_required_str(params, "start")?;
    let api = require_api(&state.api)?;

    // Week selection clears the day selection and hides the entry-add panel.
    state.view.selected_week_start = Some(start.clone());
    state.view.selected_day = None;
    state.view.armed_row = None;
    state.view.day_roster = None;
    let generation = state.view.bump();

    let per_day = api.week_overview(&start).map_err(|e| api_err(e, "Błąd"))?;
    Ok(json!({
        "generation": generation,
        "selectedWeekStart": start,
        "loginPanelVisible": false,
        "rows": day_table_rows(&per_day),
    }))
}

fn handle_weeks_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    match weeks_list(state) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_week_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    match week_select(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "weeks.list" => Some(handle_weeks_list(state, req)),
        "week.select" => Some(handle_week_select(state, req)),
        _ => None,
    }
}
