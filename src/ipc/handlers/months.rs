use serde_json::json;

use crate::calendar;
use crate::ipc::error::ok;
use crate::ipc::helpers::{api_err, get_required_u64, require_api, HandlerErr};
use crate::ipc::types::{AppState, Request, SummaryView};

const EMPTY_MONTH_MESSAGE: &str = "Brak wpisów w tym miesiącu.";

fn summary_months(state: &AppState) -> serde_json::Value {
    let buttons: Vec<serde_json::Value> = calendar::MONTH_NAMES_PL
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let month = (i + 1) as u32;
            json!({
                "month": month,
                "name": name,
                "active": state.view.selected_month == Some(month),
            })
        })
        .collect();
    json!({ "months": buttons })
}

fn summary_select_month(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let month = get_required_u64(params, "month")?;
    if !(1..=12).contains(&month) {
        return Err(HandlerErr::new("bad_params", "month must be 1-12"));
    }
    let month = month as u32;
    let api = require_api(&state.api)?;

    state.view.selected_month = Some(month);
    state.view.summary_view = Some(SummaryView::Month);
    let generation = state.view.bump();

    let entries = api.month_entries(month).map_err(|e| api_err(e, "Błąd"))?;
    if entries.is_empty() {
        // The shell paints the literal message instead of an empty table.
        return Ok(json!({
            "generation": generation,
            "view": SummaryView::Month.as_str(),
            "month": month,
            "empty": true,
            "message": EMPTY_MONTH_MESSAGE,
            "rows": [],
        }));
    }

    // Flat table, server order preserved.
    let rows: Vec<serde_json::Value> = entries
        .iter()
        .map(|e| {
            json!({
                "login": e.login,
                "name": e.name.clone().unwrap_or_default(),
                "workDate": e.work_date,
                "shift": e.shift,
            })
        })
        .collect();
    Ok(json!({
        "generation": generation,
        "view": SummaryView::Month.as_str(),
        "month": month,
        "empty": false,
        "rows": rows,
    }))
}

fn handle_summary_select_month(state: &mut AppState, req: &Request) -> serde_json::Value {
    match summary_select_month(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "summary.months" => Some(ok(&req.id, summary_months(state))),
        "summary.selectMonth" => Some(handle_summary_select_month(state, req)),
        _ => None,
    }
}
