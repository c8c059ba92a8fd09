use axum::extract::{Path, RawQuery, State};

use warehouse_core::envelope::Envelope;

use crate::domain::dto::UserDto;
use crate::domain::repository::Repositories;
use crate::domain::types::UserPayload;
use crate::error::WarehouseServiceError;
use crate::handlers::{JsonBody, pagination, parse_id};
use crate::state::AppState;
use crate::usecase::user::{
    CreateUserUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, UpdateUserUseCase,
};

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn list_users<R: Repositories>(
    State(state): State<AppState<R>>,
    RawQuery(raw_query): RawQuery,
) -> Result<Envelope<Vec<UserDto>>, WarehouseServiceError> {
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users = usecase.execute(pagination(raw_query.as_deref())).await?;
    Ok(Envelope::success(users))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Envelope<UserDto>, WarehouseServiceError> {
    let usecase = GetUserUseCase {
        repo: state.user_repo(),
    };
    Ok(Envelope::success(usecase.execute(parse_id(&id)?).await?))
}

// ── POST /users ──────────────────────────────────────────────────────────────

pub async fn create_user<R: Repositories>(
    State(state): State<AppState<R>>,
    JsonBody(body): JsonBody<UserPayload>,
) -> Result<Envelope<UserDto>, WarehouseServiceError> {
    let usecase = CreateUserUseCase {
        repo: state.user_repo(),
        hash_cost: state.hash_cost,
    };
    Ok(Envelope::success(usecase.execute(body).await?))
}

// ── PUT /users/{id} ──────────────────────────────────────────────────────────

pub async fn update_user<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UserPayload>,
) -> Result<Envelope<UserDto>, WarehouseServiceError> {
    let id = parse_id(&id)?;
    let usecase = UpdateUserUseCase {
        repo: state.user_repo(),
        hash_cost: state.hash_cost,
    };
    Ok(Envelope::success(usecase.execute(id, body).await?))
}

// ── DELETE /users/{id} ───────────────────────────────────────────────────────

pub async fn delete_user<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Envelope<UserDto>, WarehouseServiceError> {
    let usecase = DeleteUserUseCase {
        repo: state.user_repo(),
    };
    Ok(Envelope::success(usecase.execute(parse_id(&id)?).await?))
}
