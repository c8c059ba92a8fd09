use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use crate::envelope::Envelope;

/// Handler for `GET /healthz`, liveness check.
pub async fn healthz() -> Envelope<Value> {
    Envelope::success(json!({ "status": "ok" }))
}

/// Readiness response. Services call this from their own `/readyz` handler
/// after probing their dependencies.
pub fn readiness(ready: bool) -> Response {
    if ready {
        Envelope::success(json!({ "status": "ready" })).into_response()
    } else {
        Envelope::failure(
            StatusCode::SERVICE_UNAVAILABLE,
            "service unavailable",
            Some(json!({ "status": "unavailable" })),
        )
        .into_response()
    }
}
