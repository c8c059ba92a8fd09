use axum::extract::{Path, RawQuery, State};

use warehouse_core::envelope::Envelope;

use crate::domain::dto::TruckDto;
use crate::domain::repository::Repositories;
use crate::domain::types::TruckPayload;
use crate::error::WarehouseServiceError;
use crate::handlers::{JsonBody, pagination, parse_id};
use crate::state::AppState;
use crate::usecase::truck::{
    CreateTruckUseCase, DeleteTruckUseCase, GetTruckUseCase, ListTrucksUseCase,
    UpdateTruckUseCase,
};

pub async fn list_trucks<R: Repositories>(
    State(state): State<AppState<R>>,
    RawQuery(raw_query): RawQuery,
) -> Result<Envelope<Vec<TruckDto>>, WarehouseServiceError> {
    let usecase = ListTrucksUseCase {
        repo: state.truck_repo(),
    };
    let trucks = usecase.execute(pagination(raw_query.as_deref())).await?;
    Ok(Envelope::success(trucks))
}

pub async fn get_truck<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Envelope<TruckDto>, WarehouseServiceError> {
    let usecase = GetTruckUseCase {
        repo: state.truck_repo(),
    };
    Ok(Envelope::success(usecase.execute(parse_id(&id)?).await?))
}

pub async fn create_truck<R: Repositories>(
    State(state): State<AppState<R>>,
    JsonBody(body): JsonBody<TruckPayload>,
) -> Result<Envelope<TruckDto>, WarehouseServiceError> {
    let usecase = CreateTruckUseCase {
        repo: state.truck_repo(),
    };
    Ok(Envelope::success(usecase.execute(body).await?))
}

pub async fn update_truck<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<TruckPayload>,
) -> Result<Envelope<TruckDto>, WarehouseServiceError> {
    let id = parse_id(&id)?;
    let usecase = UpdateTruckUseCase {
        repo: state.truck_repo(),
    };
    Ok(Envelope::success(usecase.execute(id, body).await?))
}

pub async fn delete_truck<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Envelope<TruckDto>, WarehouseServiceError> {
    let usecase = DeleteTruckUseCase {
        repo: state.truck_repo(),
    };
    Ok(Envelope::success(usecase.execute(parse_id(&id)?).await?))
}
