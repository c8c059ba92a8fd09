use axum::extract::{Path, RawQuery, State};

use warehouse_core::envelope::Envelope;

use crate::domain::dto::RoleDto;
use crate::domain::repository::Repositories;
use crate::domain::types::RolePayload;
use crate::error::WarehouseServiceError;
use crate::handlers::{JsonBody, pagination, parse_id};
use crate::state::AppState;
use crate::usecase::role::{
    CreateRoleUseCase, DeleteRoleUseCase, GetRoleUseCase, ListRolesUseCase, UpdateRoleUseCase,
};

pub async fn list_roles<R: Repositories>(
    State(state): State<AppState<R>>,
    RawQuery(raw_query): RawQuery,
) -> Result<Envelope<Vec<RoleDto>>, WarehouseServiceError> {
    let usecase = ListRolesUseCase {
        repo: state.role_repo(),
    };
    let roles = usecase.execute(pagination(raw_query.as_deref())).await?;
    Ok(Envelope::success(roles))
}

pub async fn get_role<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Envelope<RoleDto>, WarehouseServiceError> {
    let usecase = GetRoleUseCase {
        repo: state.role_repo(),
    };
    Ok(Envelope::success(usecase.execute(parse_id(&id)?).await?))
}

pub async fn create_role<R: Repositories>(
    State(state): State<AppState<R>>,
    JsonBody(body): JsonBody<RolePayload>,
) -> Result<Envelope<RoleDto>, WarehouseServiceError> {
    let usecase = CreateRoleUseCase {
        repo: state.role_repo(),
    };
    Ok(Envelope::success(usecase.execute(body).await?))
}

pub async fn update_role<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<RolePayload>,
) -> Result<Envelope<RoleDto>, WarehouseServiceError> {
    let id = parse_id(&id)?;
    let usecase = UpdateRoleUseCase {
        repo: state.role_repo(),
    };
    Ok(Envelope::success(usecase.execute(id, body).await?))
}

pub async fn delete_role<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Envelope<RoleDto>, WarehouseServiceError> {
    let usecase = DeleteRoleUseCase {
        repo: state.role_repo(),
    };
    Ok(Envelope::success(usecase.execute(parse_id(&id)?).await?))
}
