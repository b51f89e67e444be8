use crate::api::{ApiError, ShiftApi};
use crate::ipc::error::err;

pub struct HandlerErr {
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl HandlerErr {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        HandlerErr {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn response(self, id: &str) -> serde_json::Value {
        err(id, self.code, self.message, self.details)
    }
}

pub fn get_required_str(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| HandlerErr::new("bad_params", format!("missing {}", key)))
}

pub fn get_required_u64(params: &serde_json::Value, key: &str) -> Result<u64, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_u64())
        .ok_or_else(|| HandlerErr::new("bad_params", format!("missing {}", key)))
}

/// Backend must be selected before any data method runs. Takes the field,
/// not the whole state, so callers can keep mutating the view.
pub fn require_api(api: &Option<Box<dyn ShiftApi>>) -> Result<&dyn ShiftApi, HandlerErr> {
    api.as_deref()
        .ok_or_else(|| HandlerErr::new("no_backend", "select a backend first"))
}

/// `fallback` is the user-facing alert text used when a rejection carries no
/// `error` field in its body.
pub fn api_err(e: ApiError, fallback: &str) -> HandlerErr {
    match e {
        ApiError::Rejected { message, .. } => HandlerErr::new(
            "api_rejected",
            message.unwrap_or_else(|| fallback.to_string()),
        ),
        ApiError::Transport(m) => HandlerErr::new("api_unreachable", m),
    }
}
