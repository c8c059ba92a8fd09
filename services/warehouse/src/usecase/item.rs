use warehouse_domain::merge::Merge;
use warehouse_domain::pagination::Pagination;

use crate::domain::dto::ItemDto;
use crate::domain::repository::ItemRepository;
use crate::domain::types::{Item, ItemPayload};
use crate::error::{Resource, WarehouseServiceError};

// ── CreateItem ───────────────────────────────────────────────────────────────

pub struct CreateItemUseCase<R: ItemRepository> {
    pub repo: R,
}

impl<R: ItemRepository> CreateItemUseCase<R> {
    pub async fn execute(&self, input: ItemPayload) -> Result<ItemDto, WarehouseServiceError> {
        if input.code.is_empty() {
            return Err(WarehouseServiceError::BadRequest("code is required".into()));
        }
        let saved = self.repo.save(&Item::from(input)).await?;
        Ok(ItemDto::from(saved))
    }
}

// ── GetItem ──────────────────────────────────────────────────────────────────

pub struct GetItemUseCase<R: ItemRepository> {
    pub repo: R,
}

impl<R: ItemRepository> GetItemUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<ItemDto, WarehouseServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(ItemDto::from)
            .ok_or(WarehouseServiceError::NotFound(Resource::Item))
    }
}

// ── ListItems ────────────────────────────────────────────────────────────────

pub struct ListItemsUseCase<R: ItemRepository> {
    pub repo: R,
}

impl<R: ItemRepository> ListItemsUseCase<R> {
    pub async fn execute(&self, page: Pagination) -> Result<Vec<ItemDto>, WarehouseServiceError> {
        let items = self.repo.find_all(page).await?;
        Ok(items.into_iter().map(ItemDto::from).collect())
    }
}

// ── UpdateItem ───────────────────────────────────────────────────────────────

pub struct UpdateItemUseCase<R: ItemRepository> {
    pub repo: R,
}

impl<R: ItemRepository> UpdateItemUseCase<R> {
    pub async fn execute(
        &self,
        id: i32,
        patch: ItemPayload,
    ) -> Result<ItemDto, WarehouseServiceError> {
        let mut item = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(WarehouseServiceError::NotFound(Resource::Item))?;
        item.merge(patch);
        let updated = self.repo.update(&item).await?;
        Ok(ItemDto::from(updated))
    }
}

// ── DeleteItem ───────────────────────────────────────────────────────────────

pub struct DeleteItemUseCase<R: ItemRepository> {
    pub repo: R,
}

impl<R: ItemRepository> DeleteItemUseCase<R> {
    pub async fn execute(&self, id: i32) -> Result<ItemDto, WarehouseServiceError> {
        let deleted = self.repo.delete_by_id(id).await?;
        Ok(ItemDto::from(deleted))
    }
}
