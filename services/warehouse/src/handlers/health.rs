use axum::extract::State;
use axum::response::Response;

use warehouse_core::health::readiness;

use crate::domain::repository::Repositories;
use crate::state::AppState;

/// `GET /readyz`: 200 while the database answers a ping, 503 otherwise.
pub async fn readyz<R: Repositories>(State(state): State<AppState<R>>) -> Response {
    readiness(state.repos.ping().await)
}
