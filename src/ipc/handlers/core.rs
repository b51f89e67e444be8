use serde_json::json;

use crate::api::HttpShiftApi;
use crate::ipc::error::ok;
use crate::ipc::helpers::{get_required_str, HandlerErr};
use crate::ipc::types::{AppState, Request, ViewState};

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "backendUrl": state.backend_url,
        }),
    )
}

fn backend_select(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let base_url = get_required_str(params, "baseUrl")?;
    let client = HttpShiftApi::new(&base_url)
        .map_err(|e| HandlerErr::new("bad_backend_url", format!("{e:#}")))?;
    state.backend_url = Some(client.base_url().to_string());
    state.api = Some(Box::new(client));
    // Selections made against the previous backend are meaningless.
    state.view = ViewState::default();
    Ok(json!({ "backendUrl": state.backend_url }))
}

fn ui_configure(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    if let Some(v) = params.get("managers") {
        let Some(arr) = v.as_array() else {
            return Err(HandlerErr::new("bad_params", "managers must be an array"));
        };
        let mut managers = Vec::with_capacity(arr.len());
        for item in arr {
            let Some(name) = item.as_str() else {
                return Err(HandlerErr::new("bad_params", "managers must be strings"));
            };
            managers.push(name.to_string());
        }
        if managers.is_empty() {
            return Err(HandlerErr::new("bad_params", "managers must not be empty"));
        }
        state.config.managers = managers;
    }
    if let Some(v) = params.get("quarterRowCap") {
        let Some(cap) = v.as_u64().filter(|c| *c > 0) else {
            return Err(HandlerErr::new("bad_params", "quarterRowCap must be a positive integer"));
        };
        state.config.quarter_row_cap = cap as usize;
    }
    Ok(json!({
        "managers": state.config.managers,
        "quarterRowCap": state.config.quarter_row_cap,
    }))
}

fn handle_backend_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    match backend_select(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_ui_configure(state: &mut AppState, req: &Request) -> serde_json::Value {
    match ui_configure(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "backend.select" => Some(handle_backend_select(state, req)),
        "ui.configure" => Some(handle_ui_configure(state, req)),
        _ => None,
    }
}
