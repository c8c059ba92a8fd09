use warehouse_domain::merge::Merge;
use warehouse_domain::pagination::Pagination;

use crate::domain::dto::OrderDto;
use crate::domain::repository::OrderRepository;
use crate::domain::types::{Order, OrderPayload};
use crate::error::{Resource, WarehouseServiceError};

// ── CreateOrder ──────────────────────────────────────────────────────────────

pub struct CreateOrderUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> CreateOrderUseCase<R> {
    /// Persists the header and its lines together.
    pub async fn execute(&self, input: OrderPayload) -> Result<OrderDto, WarehouseServiceError> {
        if input.code.is_empty() {
            return Err(WarehouseServiceError::BadRequest("code is required".into()));
        }
        let saved = self.repo.save(&Order::from(input)).await?;
        Ok(OrderDto::from(saved))
    }
}

// ── GetOrder ─────────────────────────────────────────────────────────────────

pub struct GetOrderUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> GetOrderUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<OrderDto, WarehouseServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(OrderDto::from)
            .ok_or(WarehouseServiceError::NotFound(Resource::Order))
    }
}

// ── ListOrders ───────────────────────────────────────────────────────────────

pub struct ListOrdersUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> ListOrdersUseCase<R> {
    pub async fn execute(&self, page: Pagination) -> Result<Vec<OrderDto>, WarehouseServiceError> {
        let orders = self.repo.find_all(page).await?;
        Ok(orders.into_iter().map(OrderDto::from).collect())
    }
}

// ── UpdateOrder ──────────────────────────────────────────────────────────────

pub struct UpdateOrderUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> UpdateOrderUseCase<R> {
    pub async fn execute(
        &self,
        id: i32,
        patch: OrderPayload,
    ) -> Result<OrderDto, WarehouseServiceError> {
        let mut order = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(WarehouseServiceError::NotFound(Resource::Order))?;
        order.merge(patch);
        let updated = self.repo.update(&order).await?;
        Ok(OrderDto::from(updated))
    }
}

// ── DeleteOrder ──────────────────────────────────────────────────────────────

pub struct DeleteOrderUseCase<R: OrderRepository> {
    pub repo: R,
}

impl<R: OrderRepository> DeleteOrderUseCase<R> {
    /// On failure only the error is returned, never the loaded order.
    pub async fn execute(&self, id: i32) -> Result<OrderDto, WarehouseServiceError> {
        let deleted = self.repo.delete_by_id(id).await?;
        Ok(OrderDto::from(deleted))
    }
}
