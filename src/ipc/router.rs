use super::handlers;
use super::types::{AppState, Request};
use crate::ipc::error::err;

pub fn handle_request(state: &mut AppState, req: Request) -> serde_json::Value {
    if let Some(resp) = handlers::core::try_handle(state, &req) {
        return resp;
    }
    if let Some(resp) = handlers::weeks::try_handle(state, &req) {
        return resp;
    }
    if let Some(resp) = handlers::days::try_handle(state, &req) {
        return resp;
    }
    if let Some(resp) = handlers::shifts::try_handle(state, &req) {
        return resp;
    }
    if let Some(resp) = handlers::months::try_handle(state, &req) {
        return resp;
    }
    if let Some(resp) = handlers::quarters::try_handle(state, &req) {
        return resp;
    }

    err(
        &req.id,
        "not_implemented",
        format!("unknown method: {}", req.method),
        None,
    )
}
