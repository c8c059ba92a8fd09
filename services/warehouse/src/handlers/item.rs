use axum::extract::{Path, RawQuery, State};

use warehouse_core::envelope::Envelope;

use crate::domain::dto::ItemDto;
use crate::domain::repository::Repositories;
use crate::domain::types::ItemPayload;
use crate::error::WarehouseServiceError;
use crate::handlers::{JsonBody, pagination, parse_id};
use crate::state::AppState;
use crate::usecase::item::{
    CreateItemUseCase, DeleteItemUseCase, GetItemUseCase, ListItemsUseCase, UpdateItemUseCase,
};

// ── GET /items ───────────────────────────────────────────────────────────────

pub async fn list_items<R: Repositories>(
    State(state): State<AppState<R>>,
    RawQuery(raw_query): RawQuery,
) -> Result<Envelope<Vec<ItemDto>>, WarehouseServiceError> {
    let usecase = ListItemsUseCase {
        repo: state.item_repo(),
    };
    let items = usecase.execute(pagination(raw_query.as_deref())).await?;
    Ok(Envelope::success(items))
}

// ── GET /items/{id} ──────────────────────────────────────────────────────────

pub async fn get_item<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Envelope<ItemDto>, WarehouseServiceError> {
    let usecase = GetItemUseCase {
        repo: state.item_repo(),
    };
    Ok(Envelope::success(usecase.execute(parse_id(&id)?).await?))
}

// ── POST /items ──────────────────────────────────────────────────────────────

pub async fn create_item<R: Repositories>(
    State(state): State<AppState<R>>,
    JsonBody(body): JsonBody<ItemPayload>,
) -> Result<Envelope<ItemDto>, WarehouseServiceError> {
    let usecase = CreateItemUseCase {
        repo: state.item_repo(),
    };
    Ok(Envelope::success(usecase.execute(body).await?))
}

// ── PUT /items/{id} ──────────────────────────────────────────────────────────

pub async fn update_item<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<ItemPayload>,
) -> Result<Envelope<ItemDto>, WarehouseServiceError> {
    let id = parse_id(&id)?;
    let usecase = UpdateItemUseCase {
        repo: state.item_repo(),
    };
    Ok(Envelope::success(usecase.execute(id, body).await?))
}

// ── DELETE /items/{id} ───────────────────────────────────────────────────────

pub async fn delete_item<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Envelope<ItemDto>, WarehouseServiceError> {
    let usecase = DeleteItemUseCase {
        repo: state.item_repo(),
    };
    Ok(Envelope::success(usecase.execute(parse_id(&id)?).await?))
}
