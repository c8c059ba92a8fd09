use axum::extract::{Path, RawQuery, State};

use warehouse_core::envelope::Envelope;

use crate::domain::dto::OrderDto;
use crate::domain::repository::Repositories;
use crate::domain::types::OrderPayload;
use crate::error::WarehouseServiceError;
use crate::handlers::{JsonBody, pagination, parse_id};
use crate::state::AppState;
use crate::usecase::order::{
    CreateOrderUseCase, DeleteOrderUseCase, GetOrderUseCase, ListOrdersUseCase,
    UpdateOrderUseCase,
};

// ── GET /orders ──────────────────────────────────────────────────────────────

pub async fn list_orders<R: Repositories>(
    State(state): State<AppState<R>>,
    RawQuery(raw_query): RawQuery,
) -> Result<Envelope<Vec<OrderDto>>, WarehouseServiceError> {
    let usecase = ListOrdersUseCase {
        repo: state.order_repo(),
    };
    let orders = usecase.execute(pagination(raw_query.as_deref())).await?;
    Ok(Envelope::success(orders))
}

// ── GET /orders/{id} ─────────────────────────────────────────────────────────

pub async fn get_order<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Envelope<OrderDto>, WarehouseServiceError> {
    let usecase = GetOrderUseCase {
        repo: state.order_repo(),
    };
    Ok(Envelope::success(usecase.execute(parse_id(&id)?).await?))
}

// ── POST /orders ─────────────────────────────────────────────────────────────

pub async fn create_order<R: Repositories>(
    State(state): State<AppState<R>>,
    JsonBody(body): JsonBody<OrderPayload>,
) -> Result<Envelope<OrderDto>, WarehouseServiceError> {
    let usecase = CreateOrderUseCase {
        repo: state.order_repo(),
    };
    Ok(Envelope::success(usecase.execute(body).await?))
}

// ── PUT /orders/{id} ─────────────────────────────────────────────────────────

pub async fn update_order<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<OrderPayload>,
) -> Result<Envelope<OrderDto>, WarehouseServiceError> {
    let id = parse_id(&id)?;
    let usecase = UpdateOrderUseCase {
        repo: state.order_repo(),
    };
    Ok(Envelope::success(usecase.execute(id, body).await?))
}

// ── DELETE /orders/{id} ──────────────────────────────────────────────────────

pub async fn delete_order<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Envelope<OrderDto>, WarehouseServiceError> {
    let usecase = DeleteOrderUseCase {
        repo: state.order_repo(),
    };
    Ok(Envelope::success(usecase.execute(parse_id(&id)?).await?))
}
