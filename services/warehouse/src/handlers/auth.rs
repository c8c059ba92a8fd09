use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::response::IntoResponse;
use serde_json::json;

use warehouse_auth_types::bearer::bearer_value;
use warehouse_core::envelope::Envelope;

use crate::domain::repository::Repositories;
use crate::domain::types::SignInPayload;
use crate::error::WarehouseServiceError;
use crate::handlers::JsonBody;
use crate::state::AppState;
use crate::usecase::auth::{SignInUseCase, SignOutUseCase};

// ── POST /signIn ─────────────────────────────────────────────────────────────

/// The token travels in the `Authorization` response header, not the body.
pub async fn sign_in<R: Repositories>(
    State(state): State<AppState<R>>,
    JsonBody(body): JsonBody<SignInPayload>,
) -> Result<impl IntoResponse, WarehouseServiceError> {
    let usecase = SignInUseCase {
        users: state.user_repo(),
        roles: state.role_repo(),
        tokens: state.tokens.clone(),
    };
    let token = usecase.execute(body).await?;
    Ok(([(AUTHORIZATION, bearer_value(&token))], Envelope::ok()))
}

// ── POST /signOut ────────────────────────────────────────────────────────────

pub async fn sign_out<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<impl IntoResponse, WarehouseServiceError> {
    let usecase = SignOutUseCase {
        tokens: state.tokens.clone(),
    };
    let token = usecase.execute()?;
    Ok((
        [(AUTHORIZATION, bearer_value(&token))],
        Envelope::success(json!({ "message": "User logged out successfully" })),
    ))
}
