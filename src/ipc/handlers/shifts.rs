use serde_json::json;

use crate::api::{RosterEntry, Shift};
use crate::ipc::error::ok;
use crate::ipc::helpers::{api_err, get_required_str, require_api, HandlerErr};
use crate::ipc::types::{AppState, ArmedRow, Request, ViewState};

fn entry_row(e: &RosterEntry) -> serde_json::Value {
    json!({
        "login": e.login,
        "name": e.name.clone().unwrap_or_default(),
        "shiftPattern": e.shift_pattern.clone().unwrap_or_default(),
    })
}

/// Render model for both shift tables. Head-counts are recomputed from the
/// row vectors being rendered, never taken from a server field.
pub(in crate::ipc) fn tables_payload(view: &ViewState) -> serde_json::Value {
    let (day_rows, night_rows): (Vec<serde_json::Value>, Vec<serde_json::Value>) =
        match view.day_roster.as_ref() {
            Some(roster) => (
                roster.day_shift.iter().map(entry_row).collect(),
                roster.night_shift.iter().map(entry_row).collect(),
            ),
            None => (Vec::new(), Vec::new()),
        };
    let counts = json!({ "day": day_rows.len(), "night": night_rows.len() });
    json!({
        "generation": view.generation,
        "selectedDay": view.selected_day,
        "loginPanelVisible": view.selected_day.is_some(),
        "activeShift": view.active_shift.map(Shift::as_str),
        "dayShift": day_rows,
        "nightShift": night_rows,
        "counts": counts,
        "armed": view.armed_row.as_ref().map(|a| json!({
            "shift": a.shift.as_str(),
            "login": a.login,
        })),
    })
}

fn shift_set_active(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let raw = get_required_str(params, "shift")?;
    let shift = Shift::parse(&raw)
        .ok_or_else(|| HandlerErr::new("bad_params", "shift must be day or night"))?;
    state.view.active_shift = Some(shift);
    Ok(json!({ "activeShift": shift.as_str() }))
}

fn entry_add(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let login = params
        .get("login")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .trim()
        .to_string();

    // Validation failures carry the shell's alert text; no request goes out.
    let day = match (login.is_empty(), state.view.selected_day.clone()) {
        (false, Some(day)) => day,
        _ => return Err(HandlerErr::new("validation", "Wybierz dzień")),
    };
    let Some(shift) = state.view.active_shift else {
        return Err(HandlerErr::new("validation", "Wybierz shift"));
    };
    let api = require_api(&state.api)?;
    let week_start = state
        .view
        .selected_week_start
        .clone()
        .ok_or_else(|| HandlerErr::new("no_week_selected", "select a week first"))?;

    api.add_entry(&login, &day, shift)
        .map_err(|e| api_err(e, "Błąd"))?;

    // Success reloads the whole day, exactly as re-selecting it would.
    let roster = api.day_roster(&week_start, &day).map_err(|e| api_err(e, "Błąd"))?;
    state.view.day_roster = Some(roster);
    state.view.armed_row = None;

    let mut payload = tables_payload(&state.view);
    payload["inputCleared"] = json!(true);
    Ok(payload)
}

fn entry_arm_delete(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let table_id = get_required_str(params, "tableId")?;
    let login = get_required_str(params, "login")?;
    // Shift is inferred from the table id, the same substring test the shell
    // applies to its container ids.
    let shift = if table_id.contains("day") {
        Shift::Day
    } else {
        Shift::Night
    };

    let roster = state
        .view
        .day_roster
        .as_ref()
        .ok_or_else(|| HandlerErr::new("no_day_selected", "select a day first"))?;
    let rows = match shift {
        Shift::Day => &roster.day_shift,
        Shift::Night => &roster.night_shift,
    };
    if !rows.iter().any(|r| r.login == login) {
        return Err(HandlerErr::new("not_found", "no such row"));
    }

    // Arming is exclusive; a new arm replaces the previous one.
    let payload = json!({ "armed": { "shift": shift.as_str(), "login": login } });
    state.view.armed_row = Some(ArmedRow { shift, login });
    Ok(payload)
}

fn entry_disarm(state: &mut AppState) -> serde_json::Value {
    state.view.armed_row = None;
    json!({ "armed": serde_json::Value::Null })
}

fn entry_confirm_delete(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    let Some(armed) = state.view.armed_row.clone() else {
        // Delete with nothing armed is a no-op, like the bare keypress.
        let mut payload = tables_payload(&state.view);
        payload["deleted"] = json!(false);
        return Ok(payload);
    };
    let api = require_api(&state.api)?;
    let day = state
        .view
        .selected_day
        .clone()
        .ok_or_else(|| HandlerErr::new("no_day_selected", "select a day first"))?;

    // On rejection the row stays rendered and stays armed.
    api.delete_entry(&armed.login, &day, armed.shift)
        .map_err(|e| api_err(e, "Błąd przy usuwaniu"))?;

    // Remove exactly the armed row. Duplicate logins are indistinguishable;
    // the first match goes.
    if let Some(roster) = state.view.day_roster.as_mut() {
        let rows = match armed.shift {
            Shift::Day => &mut roster.day_shift,
            Shift::Night => &mut roster.night_shift,
        };
        if let Some(idx) = rows.iter().position(|r| r.login == armed.login) {
            rows.remove(idx);
        }
    }
    state.view.armed_row = None;

    let mut payload = tables_payload(&state.view);
    payload["deleted"] = json!(true);
    Ok(payload)
}

fn handle_shift_set_active(state: &mut AppState, req: &Request) -> serde_json::Value {
    match shift_set_active(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_entry_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    match entry_add(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_entry_arm_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    match entry_arm_delete(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_entry_confirm_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    match entry_confirm_delete(state) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "shift.setActive" => Some(handle_shift_set_active(state, req)),
        "entry.add" => Some(handle_entry_add(state, req)),
        "entry.armDelete" => Some(handle_entry_arm_delete(state, req)),
        "entry.disarm" => Some(ok(&req.id, entry_disarm(state))),
        "entry.confirmDelete" => Some(handle_entry_confirm_delete(state, req)),
        _ => None,
    }
}
