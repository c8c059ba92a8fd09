use warehouse_domain::merge::Merge;
use warehouse_domain::pagination::Pagination;

use crate::domain::dto::TruckDto;
use crate::domain::repository::TruckRepository;
use crate::domain::types::{Truck, TruckPayload};
use crate::error::{Resource, WarehouseServiceError};

pub struct CreateTruckUseCase<R: TruckRepository> {
    pub repo: R,
}

impl<R: TruckRepository> CreateTruckUseCase<R> {
    pub async fn execute(&self, input: TruckPayload) -> Result<TruckDto, WarehouseServiceError> {
        let saved = self.repo.save(&Truck::from(input)).await?;
        Ok(TruckDto::from(saved))
    }
}

pub struct GetTruckUseCase<R: TruckRepository> {
    pub repo: R,
}

impl<R: TruckRepository> GetTruckUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<TruckDto, WarehouseServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(TruckDto::from)
            .ok_or(WarehouseServiceError::NotFound(Resource::Truck))
    }
}

pub struct ListTrucksUseCase<R: TruckRepository> {
    pub repo: R,
}

impl<R: TruckRepository> ListTrucksUseCase<R> {
    pub async fn execute(&self, page: Pagination) -> Result<Vec<TruckDto>, WarehouseServiceError> {
        let trucks = self.repo.find_all(page).await?;
        Ok(trucks.into_iter().map(TruckDto::from).collect())
    }
}

pub struct UpdateTruckUseCase<R: TruckRepository> {
    pub repo: R,
}

impl<R: TruckRepository> UpdateTruckUseCase<R> {
    pub async fn execute(
        &self,
        id: i32,
        patch: TruckPayload,
    ) -> Result<TruckDto, WarehouseServiceError> {
        let mut truck = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(WarehouseServiceError::NotFound(Resource::Truck))?;
        truck.merge(patch);
        let updated = self.repo.update(&truck).await?;
        Ok(TruckDto::from(updated))
    }
}

pub struct DeleteTruckUseCase<R: TruckRepository> {
    pub repo: R,
}

impl<R: TruckRepository> DeleteTruckUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<TruckDto, WarehouseServiceError> {
        let deleted = self.repo.delete_by_id(id).await?;
        Ok(TruckDto::from(deleted))
    }
}
