use std::sync::{Arc, Mutex};

use warehouse_domain::pagination::Pagination;

use crate::domain::repository::{
    ItemRepository, OrderRepository, Repository, RoleRepository, TruckRepository, UserRepository,
};
use crate::domain::types::{Entity, Item, Order, Role, Truck, User};
use crate::error::WarehouseServiceError;

/// Vec-backed repository. Ids are assigned on save when zero; `unique`
/// extracts the key that must not repeat.
#[derive(Clone)]
pub struct MemoryRepo<T> {
    pub rows: Arc<Mutex<Vec<T>>>,
    unique: fn(&T) -> String,
    assign_id: fn(&mut T, i32),
}

impl<T: Entity> MemoryRepo<T> {
    fn with(rows: Vec<T>, unique: fn(&T) -> String, assign_id: fn(&mut T, i32)) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
            unique,
            assign_id,
        }
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.rows.lock().unwrap().clone()
    }
}

impl MemoryRepo<User> {
    pub fn users(rows: Vec<User>) -> Self {
        Self::with(rows, |u| u.username.clone(), |u, id| u.id = id)
    }
}

impl MemoryRepo<Role> {
    pub fn roles(rows: Vec<Role>) -> Self {
        Self::with(rows, |r| r.id.to_string(), |_, _| {})
    }
}

impl MemoryRepo<Item> {
    pub fn items(rows: Vec<Item>) -> Self {
        Self::with(rows, |i| i.code.clone(), |i, id| i.id = id)
    }
}

impl MemoryRepo<Truck> {
    pub fn trucks(rows: Vec<Truck>) -> Self {
        Self::with(rows, |t| format!("truck-{}", t.id), |t, id| t.id = id)
    }
}

impl MemoryRepo<Order> {
    pub fn orders(rows: Vec<Order>) -> Self {
        Self::with(
            rows,
            |o| o.code.clone(),
            |o, id| {
                o.id = id;
                for line in &mut o.order_items {
                    line.order_id = Some(id);
                }
            },
        )
    }
}

impl<T: Entity> Repository<T> for MemoryRepo<T> {
    async fn find_all(&self, page: Pagination) -> Result<Vec<T>, WarehouseServiceError> {
        let rows = self.rows.lock().unwrap();
        Ok(page.slice(&rows).to_vec())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<T>, WarehouseServiceError> {
        Ok(self.rows.lock().unwrap().iter().find(|r| r.id() == id).cloned())
    }

    async fn save(&self, entity: &T) -> Result<T, WarehouseServiceError> {
        let mut rows = self.rows.lock().unwrap();
        let mut stored = entity.clone();
        if stored.id() == 0 {
            let next = rows.iter().map(|r| r.id()).max().unwrap_or(0) + 1;
            (self.assign_id)(&mut stored, next);
        }
        let key = (self.unique)(&stored);
        if rows.iter().any(|r| (self.unique)(r) == key) {
            return Err(WarehouseServiceError::DuplicateKey(T::RESOURCE));
        }
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, entity: &T) -> Result<T, WarehouseServiceError> {
        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|r| r.id() == entity.id())
            .ok_or(WarehouseServiceError::NotFound(T::RESOURCE))?;
        *slot = entity.clone();
        Ok(entity.clone())
    }

    async fn delete(&self, entity: &T) -> Result<(), WarehouseServiceError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id() != entity.id());
        if rows.len() == before {
            return Err(WarehouseServiceError::NotFound(T::RESOURCE));
        }
        Ok(())
    }
}

impl UserRepository for MemoryRepo<User> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, WarehouseServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
}

impl RoleRepository for MemoryRepo<Role> {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, WarehouseServiceError> {
        Ok(self.rows.lock().unwrap().iter().find(|r| r.name == name).cloned())
    }
}

impl ItemRepository for MemoryRepo<Item> {
    async fn find_by_name(&self, name: &str) -> Result<Option<Item>, WarehouseServiceError> {
        Ok(self.rows.lock().unwrap().iter().find(|i| i.name == name).cloned())
    }
}

impl TruckRepository for MemoryRepo<Truck> {}

impl OrderRepository for MemoryRepo<Order> {}
