use crate::ipc::error::ok;
use crate::ipc::helpers::{api_err, get_required_str, require_api, HandlerErr};
use crate::ipc::types::{AppState, Request};

use super::shifts;

fn day_select(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let day = get_required_str(params, "day")?;
    let api = require_api(&state.api)?;
    let week_start = state
        .view
        .selected_week_start
        .clone()
        .ok_or_else(|| HandlerErr::new("no_week_selected", "select a week first"))?;

    // Day selection reveals the entry-add panel and supersedes any armed row.
    state.view.selected_day = Some(day.clone());
    state.view.armed_row = None;
    state.view.bump();

    let roster = api.day_roster(&week_start, &day).map_err(|e| api_err(e, "Błąd"))?;
    state.view.day_roster = Some(roster);
    Ok(shifts::tables_payload(&state.view))
}

fn handle_day_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    match day_select(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "day.select" => Some(handle_day_select(state, req)),
        _ => None,
    }
}
