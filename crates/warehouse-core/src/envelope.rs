//! Uniform `{code, message, data?}` response body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

pub const SUCCESS_MESSAGE: &str = "Success";

/// Every response body, success or failure, has this shape.
///
/// `code` mirrors the HTTP status. `data` is omitted when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            message: SUCCESS_MESSAGE.to_owned(),
            data: Some(data),
        }
    }

    pub fn failure(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            code: status.as_u16(),
            message: message.into(),
            data,
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl Envelope<()> {
    /// Success with no payload.
    pub fn ok() -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            message: SUCCESS_MESSAGE.to_owned(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
