use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use warehouse_auth_types::token::AuthError;
use warehouse_core::envelope::Envelope;

/// The entity an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Role,
    Item,
    Truck,
    Order,
}

impl Resource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Role => "role",
            Self::Item => "item",
            Self::Truck => "truck",
            Self::Order => "order",
        }
    }

    fn not_found_kind(self) -> &'static str {
        match self {
            Self::User => "USER_NOT_FOUND",
            Self::Role => "ROLE_NOT_FOUND",
            Self::Item => "ITEM_NOT_FOUND",
            Self::Truck => "TRUCK_NOT_FOUND",
            Self::Order => "ORDER_NOT_FOUND",
        }
    }

    fn duplicate_kind(self) -> &'static str {
        match self {
            Self::User => "USER_ALREADY_EXISTS",
            Self::Role => "ROLE_ALREADY_EXISTS",
            Self::Item => "ITEM_ALREADY_EXISTS",
            Self::Truck => "TRUCK_ALREADY_EXISTS",
            Self::Order => "ORDER_ALREADY_EXISTS",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Warehouse service error variants.
#[derive(Debug, thiserror::Error)]
pub enum WarehouseServiceError {
    #[error("{0}")]
    BadRequest(String),
    #[error("missing authorization header")]
    MissingAuthorization,
    #[error("invalid token")]
    InvalidToken(#[source] AuthError),
    #[error("missing role claim")]
    MissingRoleClaim,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("forbidden")]
    Forbidden,
    #[error("{0} not found")]
    NotFound(Resource),
    #[error("{0} already exists")]
    DuplicateKey(Resource),
    #[error("storage error")]
    Storage(#[source] anyhow::Error),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl WarehouseServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::MissingAuthorization => "MISSING_AUTHORIZATION",
            Self::InvalidToken(_) => "INVALID_TOKEN",
            Self::MissingRoleClaim => "MISSING_ROLE_CLAIM",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound(r) => r.not_found_kind(),
            Self::DuplicateKey(r) => r.duplicate_kind(),
            Self::Storage(_) => "STORAGE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MissingAuthorization
            | Self::InvalidToken(_)
            | Self::MissingRoleClaim
            | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateKey(_) => StatusCode::CONFLICT,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for WarehouseServiceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for WarehouseServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // 4xx are already recorded by the trace layer.
        if let Self::Storage(ref e) | Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = self.kind(), "internal error");
        }
        let mut data = json!({ "kind": self.kind() });
        if let Self::InvalidToken(ref cause) = self {
            data["cause"] = Value::String(cause.to_string());
        }
        Envelope::failure(status, self.to_string(), Some(data)).into_response()
    }
}
