use chrono::{Datelike, Local};
use serde_json::json;

use crate::ipc::error::ok;
use crate::ipc::helpers::{api_err, get_required_u64, require_api, HandlerErr};
use crate::ipc::types::{AppState, Request, SummaryView};

fn summary_quarters(state: &AppState) -> serde_json::Value {
    let buttons: Vec<serde_json::Value> = (1u32..=4)
        .map(|q| {
            json!({
                "quarter": q,
                "label": format!("Q{q}"),
                "active": state.view.selected_quarter == Some(q),
            })
        })
        .collect();
    json!({ "quarters": buttons })
}

fn summary_select_quarter(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let quarter = get_required_u64(params, "q")?;
    if !(1..=4).contains(&quarter) {
        return Err(HandlerErr::new("bad_params", "q must be 1-4"));
    }
    let quarter = quarter as u32;
    let api = require_api(&state.api)?;

    // Quarter selection deselects the active month button and forces the
    // quarter view; the month view stays hidden until a month is selected.
    state.view.selected_month = None;
    state.view.selected_quarter = Some(quarter);
    state.view.summary_view = Some(SummaryView::Quarter);
    let generation = state.view.bump();

    // Current calendar year unless the shell pins one.
    let year = params
        .get("year")
        .and_then(|v| v.as_i64())
        .map(|y| y as i32)
        .unwrap_or_else(|| Local::now().year());

    let per_manager = api
        .quarter_summary(quarter, year)
        .map_err(|e| api_err(e, "Błąd"))?;

    // Fixed roster, fixed order. Managers the server returns outside the
    // roster never render; rows beyond the cap are dropped; short lists pad
    // with placeholder dash pairs.
    let cap = state.config.quarter_row_cap;
    let cards: Vec<serde_json::Value> = state
        .config
        .managers
        .iter()
        .map(|name| {
            let mut rows: Vec<serde_json::Value> = per_manager
                .get(name)
                .map(|list| {
                    list.iter()
                        .take(cap)
                        .map(|c| json!({ "login": c.login, "count": c.count }))
                        .collect()
                })
                .unwrap_or_default();
            while rows.len() < cap {
                rows.push(json!({ "login": "-", "count": "-" }));
            }
            json!({ "manager": name, "rows": rows })
        })
        .collect();

    Ok(json!({
        "generation": generation,
        "view": SummaryView::Quarter.as_str(),
        "quarter": quarter,
        "year": year,
        "cards": cards,
    }))
}

fn handle_summary_select_quarter(state: &mut AppState, req: &Request) -> serde_json::Value {
    match summary_select_quarter(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "summary.quarters" => Some(ok(&req.id, summary_quarters(state))),
        "summary.selectQuarter" => Some(handle_summary_select_quarter(state, req)),
        _ => None,
    }
}
