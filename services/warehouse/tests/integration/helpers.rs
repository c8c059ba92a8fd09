use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;

use warehouse_api::domain::repository::{
    ItemRepository, OrderRepository, Repositories, Repository, RoleRepository, TruckRepository,
    UserRepository,
};
use warehouse_api::domain::types::{Entity, Item, Order, Role, Truck, User};
use warehouse_api::error::WarehouseServiceError;
use warehouse_api::router::build_router;
use warehouse_api::state::AppState;
use warehouse_auth_types::password::hash_password;
use warehouse_domain::pagination::Pagination;
use warehouse_testing::auth::MockAuth;

pub const TEST_COST: u32 = 4;
pub const SYS_ADMIN_PASSWORD: &str = "Test1234!";

// ── In-memory table ──────────────────────────────────────────────────────────

struct Stored<T> {
    row: T,
    deleted: bool,
}

/// One table guarded by a mutex. `key` names the unique column, if any.
///
/// Deletes stamp a flag unless the table is built with [`Table::hard`], the
/// way roles are removed outright. Ids are never reused and unique keys still
/// clash with deleted rows, as with the real columns.
#[derive(Clone)]
pub struct Table<T> {
    rows: Arc<Mutex<Vec<Stored<T>>>>,
    key: Option<fn(&T) -> String>,
    soft: bool,
}

impl<T: Entity> Table<T> {
    fn new(rows: Vec<T>, key: Option<fn(&T) -> String>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(
                rows.into_iter()
                    .map(|row| Stored {
                        row,
                        deleted: false,
                    })
                    .collect(),
            )),
            key,
            soft: true,
        }
    }

    fn hard(self) -> Self {
        Self {
            soft: false,
            ..self
        }
    }

    /// Live rows only.
    pub fn rows(&self) -> Vec<T> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| !s.deleted)
            .map(|s| s.row.clone())
            .collect()
    }

    /// Live and deleted rows, in insertion order.
    pub fn all_rows(&self) -> Vec<(T, bool)> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .map(|s| (s.row.clone(), s.deleted))
            .collect()
    }

    fn next_id(rows: &[Stored<T>]) -> i32 {
        rows.iter().map(|s| s.row.id()).max().unwrap_or(0) + 1
    }

    fn clashes(&self, rows: &[Stored<T>], candidate: &T) -> bool {
        let Some(key) = self.key else { return false };
        let wanted = key(candidate);
        rows.iter()
            .any(|s| s.row.id() != candidate.id() && key(&s.row) == wanted)
    }

    fn insert(
        &self,
        mut entity: T,
        assign: impl FnOnce(&mut T, i32),
    ) -> Result<T, WarehouseServiceError> {
        let mut rows = self.rows.lock().unwrap();
        if entity.id() == 0 {
            let id = Self::next_id(&rows);
            assign(&mut entity, id);
        } else if rows.iter().any(|s| s.row.id() == entity.id()) {
            return Err(WarehouseServiceError::DuplicateKey(T::RESOURCE));
        }
        if self.clashes(&rows, &entity) {
            return Err(WarehouseServiceError::DuplicateKey(T::RESOURCE));
        }
        rows.push(Stored {
            row: entity.clone(),
            deleted: false,
        });
        Ok(entity)
    }

    fn replace(
        &self,
        mut entity: T,
        stamp: impl FnOnce(&mut T),
    ) -> Result<T, WarehouseServiceError> {
        let mut rows = self.rows.lock().unwrap();
        if self.clashes(&rows, &entity) {
            return Err(WarehouseServiceError::DuplicateKey(T::RESOURCE));
        }
        let slot = rows
            .iter_mut()
            .find(|s| !s.deleted && s.row.id() == entity.id())
            .ok_or(WarehouseServiceError::NotFound(T::RESOURCE))?;
        stamp(&mut entity);
        slot.row = entity.clone();
        Ok(entity)
    }

    fn remove(&self, id: i32) -> Result<(), WarehouseServiceError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(pos) = rows.iter().position(|s| !s.deleted && s.row.id() == id) else {
            return Err(WarehouseServiceError::NotFound(T::RESOURCE));
        };
        if self.soft {
            rows[pos].deleted = true;
        } else {
            rows.remove(pos);
        }
        Ok(())
    }

    fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| !s.deleted && pred(&s.row))
            .map(|s| s.row.clone())
    }
}

macro_rules! table_repository {
    ($entity:ty, $assign:expr, $stamp:expr) => {
        impl Repository<$entity> for Table<$entity> {
            async fn find_all(
                &self,
                page: Pagination,
            ) -> Result<Vec<$entity>, WarehouseServiceError> {
                Ok(page.slice(&self.rows()).to_vec())
            }

            async fn find_by_id(&self, id: i32) -> Result<Option<$entity>, WarehouseServiceError> {
                Ok(self.find(|r| r.id == id))
            }

            async fn save(&self, entity: &$entity) -> Result<$entity, WarehouseServiceError> {
                self.insert(entity.clone(), $assign)
            }

            async fn update(&self, entity: &$entity) -> Result<$entity, WarehouseServiceError> {
                self.replace(entity.clone(), $stamp)
            }

            async fn delete(&self, entity: &$entity) -> Result<(), WarehouseServiceError> {
                self.remove(entity.id)
            }
        }
    };
}

/// Line ids come from one counter, like the `order_items` serial column.
static NEXT_LINE_ID: AtomicI32 = AtomicI32::new(1);

fn stamp_new_lines(order: &mut Order) {
    for line in order.order_items.iter_mut().filter(|l| l.id == 0) {
        line.id = NEXT_LINE_ID.fetch_add(1, Ordering::Relaxed);
        line.order_id = Some(order.id);
    }
}

table_repository!(User, |u: &mut User, id| u.id = id, |_: &mut User| {});
table_repository!(Role, |r: &mut Role, id| r.id = id, |_: &mut Role| {});
table_repository!(Item, |i: &mut Item, id| i.id = id, |_: &mut Item| {});
table_repository!(Truck, |t: &mut Truck, id| t.id = id, |_: &mut Truck| {});
table_repository!(
    Order,
    |o: &mut Order, id| {
        o.id = id;
        stamp_new_lines(o);
    },
    stamp_new_lines
);

impl UserRepository for Table<User> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, WarehouseServiceError> {
        Ok(self.find(|u| u.username == username))
    }
}

impl RoleRepository for Table<Role> {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, WarehouseServiceError> {
        Ok(self.find(|r| r.name == name))
    }
}

impl ItemRepository for Table<Item> {
    async fn find_by_name(&self, name: &str) -> Result<Option<Item>, WarehouseServiceError> {
        Ok(self.find(|i| i.name == name))
    }
}

impl TruckRepository for Table<Truck> {}

impl OrderRepository for Table<Order> {}

// ── Repository set ───────────────────────────────────────────────────────────

fn username_key(u: &User) -> String {
    u.username.clone()
}

fn role_name_key(r: &Role) -> String {
    r.name.clone()
}

fn item_code_key(i: &Item) -> String {
    i.code.clone()
}

fn order_code_key(o: &Order) -> String {
    o.code.clone()
}

#[derive(Clone)]
pub struct FakeRepositories {
    pub users: Table<User>,
    pub roles: Table<Role>,
    pub items: Table<Item>,
    pub trucks: Table<Truck>,
    pub orders: Table<Order>,
    pub healthy: bool,
}

impl FakeRepositories {
    /// Seeded with the three built-in roles and one SysAdmin account.
    pub fn seeded() -> Self {
        let roles = ["User", "Admin", "SysAdmin"]
            .into_iter()
            .zip(1..)
            .map(|(name, id)| Role {
                id,
                name: name.to_owned(),
            })
            .collect();
        let sys_admin = User {
            id: 1,
            first_name: "Sys".into(),
            last_name: "Admin".into(),
            username: "sysAdminTest".into(),
            password: hash_password(SYS_ADMIN_PASSWORD, TEST_COST).unwrap(),
            role_id: Some(3),
        };
        Self {
            users: Table::new(vec![sys_admin], Some(username_key)),
            roles: Table::new(roles, Some(role_name_key)).hard(),
            items: Table::new(vec![], Some(item_code_key)),
            trucks: Table::new(vec![], None),
            orders: Table::new(vec![], Some(order_code_key)),
            healthy: true,
        }
    }
}

impl Repositories for FakeRepositories {
    type Users = Table<User>;
    type Roles = Table<Role>;
    type Items = Table<Item>;
    type Trucks = Table<Truck>;
    type Orders = Table<Order>;

    fn users(&self) -> Table<User> {
        self.users.clone()
    }

    fn roles(&self) -> Table<Role> {
        self.roles.clone()
    }

    fn items(&self) -> Table<Item> {
        self.items.clone()
    }

    fn trucks(&self) -> Table<Truck> {
        self.trucks.clone()
    }

    fn orders(&self) -> Table<Order> {
        self.orders.clone()
    }

    async fn ping(&self) -> bool {
        self.healthy
    }
}

// ── Server ───────────────────────────────────────────────────────────────────

pub fn server_with(repos: FakeRepositories) -> TestServer {
    let state = AppState::new(repos, MockAuth::keys(), TEST_COST);
    TestServer::new(build_router(state)).unwrap()
}

pub fn server() -> TestServer {
    server_with(FakeRepositories::seeded())
}

pub fn auth(identity: &MockAuth) -> (HeaderName, HeaderValue) {
    (AUTHORIZATION, identity.header_value())
}
