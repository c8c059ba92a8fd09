use std::future::Future;

use warehouse_domain::pagination::Pagination;

use crate::domain::types::{Entity, Item, Order, Role, Truck, User};
use crate::error::WarehouseServiceError;

// Methods return `impl Future + Send` rather than `async fn` so generic
// handlers over these traits stay `Send`.

/// CRUD shared by every entity.
///
/// Unique-constraint violations surface as `DuplicateKey`, a missing row on
/// update or delete as `NotFound`, and any other store failure as `Storage`.
pub trait Repository<T: Entity>: Send + Sync {
    /// Live rows ordered by id, windowed by `page`.
    fn find_all(
        &self,
        page: Pagination,
    ) -> impl Future<Output = Result<Vec<T>, WarehouseServiceError>> + Send;

    fn find_by_id(
        &self,
        id: i32,
    ) -> impl Future<Output = Result<Option<T>, WarehouseServiceError>> + Send;

    /// Insert and return the stored row with its assigned id.
    fn save(&self, entity: &T) -> impl Future<Output = Result<T, WarehouseServiceError>> + Send;

    fn update(&self, entity: &T) -> impl Future<Output = Result<T, WarehouseServiceError>> + Send;

    fn delete(&self, entity: &T) -> impl Future<Output = Result<(), WarehouseServiceError>> + Send;

    /// Load then delete, returning the deleted row.
    fn delete_by_id(
        &self,
        id: i32,
    ) -> impl Future<Output = Result<T, WarehouseServiceError>> + Send {
        async move {
            let entity = self
                .find_by_id(id)
                .await?
                .ok_or(WarehouseServiceError::NotFound(T::RESOURCE))?;
            self.delete(&entity).await?;
            Ok(entity)
        }
    }
}

pub trait UserRepository: Repository<User> {
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, WarehouseServiceError>> + Send;
}

/// Roles are hard-deleted; every other table is soft-deleted.
pub trait RoleRepository: Repository<Role> {
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Role>, WarehouseServiceError>> + Send;
}

pub trait ItemRepository: Repository<Item> {
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<Item>, WarehouseServiceError>> + Send;
}

pub trait TruckRepository: Repository<Truck> {}

/// Reads load each order's lines. `update` keeps lines that still carry an
/// id, soft-deletes the rest and inserts lines with `id == 0`.
pub trait OrderRepository: Repository<Order> {}

/// Every repository the service needs, handed out per request.
pub trait Repositories: Clone + Send + Sync + 'static {
    type Users: UserRepository;
    type Roles: RoleRepository;
    type Items: ItemRepository;
    type Trucks: TruckRepository;
    type Orders: OrderRepository;

    fn users(&self) -> Self::Users;
    fn roles(&self) -> Self::Roles;
    fn items(&self) -> Self::Items;
    fn trucks(&self) -> Self::Trucks;
    fn orders(&self) -> Self::Orders;

    /// Whether the backing store answers.
    fn ping(&self) -> impl Future<Output = bool> + Send;
}
