use chrono::{DateTime, Utc};
use serde::Deserialize;

use warehouse_domain::merge::{Merge, overlay};

use crate::error::Resource;

/// A persisted record with a surrogate id.
pub trait Entity: Clone + Send + Sync + 'static {
    const RESOURCE: Resource;

    fn id(&self) -> i32;
}

// ── Entities ─────────────────────────────────────────────────────────────────

/// Account. `password` always holds a bcrypt hash once persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
    pub role_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub code: String,
    pub total_quantity: i32,
    pub available_quantity: i32,
    pub price: f64,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Truck {
    pub id: i32,
    pub chassis_number: String,
    pub license_plate: String,
}

/// Order header with its owned lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i32,
    pub code: String,
    pub submitted_date: Option<DateTime<Utc>>,
    pub deadline_date: Option<DateTime<Utc>>,
    pub user_id: Option<i32>,
    pub order_items: Vec<OrderItem>,
}

/// Order line. `id == 0` marks a line not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub id: i32,
    pub item_id: Option<i32>,
    pub order_id: Option<i32>,
    pub quantity: i32,
}

impl Entity for User {
    const RESOURCE: Resource = Resource::User;
    fn id(&self) -> i32 {
        self.id
    }
}

impl Entity for Role {
    const RESOURCE: Resource = Resource::Role;
    fn id(&self) -> i32 {
        self.id
    }
}

impl Entity for Item {
    const RESOURCE: Resource = Resource::Item;
    fn id(&self) -> i32 {
        self.id
    }
}

impl Entity for Truck {
    const RESOURCE: Resource = Resource::Truck;
    fn id(&self) -> i32 {
        self.id
    }
}

impl Entity for Order {
    const RESOURCE: Resource = Resource::Order;
    fn id(&self) -> i32 {
        self.id
    }
}

// ── Request payloads ─────────────────────────────────────────────────────────
//
// Every field defaults to its zero value so one payload type serves both
// create and partial update.

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignInPayload {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPayload {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
    #[serde(alias = "roleId")]
    pub role: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RolePayload {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemPayload {
    pub name: String,
    pub description: String,
    pub code: String,
    pub total_quantity: i32,
    pub available_quantity: i32,
    pub price: f64,
    pub category: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TruckPayload {
    pub chassis_number: String,
    pub license_plate: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderPayload {
    pub code: String,
    pub submitted_date: Option<DateTime<Utc>>,
    pub deadline_date: Option<DateTime<Utc>>,
    #[serde(alias = "userId")]
    pub user: Option<i32>,
    pub order_items: Vec<OrderItemPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderItemPayload {
    #[serde(alias = "itemId")]
    pub item: Option<i32>,
    pub quantity: i32,
}

// ── Payload → entity ─────────────────────────────────────────────────────────

impl From<UserPayload> for User {
    fn from(p: UserPayload) -> Self {
        Self {
            id: 0,
            first_name: p.first_name,
            last_name: p.last_name,
            username: p.username,
            password: p.password,
            role_id: p.role.filter(|r| *r != 0),
        }
    }
}

impl From<RolePayload> for Role {
    fn from(p: RolePayload) -> Self {
        Self {
            id: p.id,
            name: p.name,
        }
    }
}

impl From<ItemPayload> for Item {
    fn from(p: ItemPayload) -> Self {
        Self {
            id: 0,
            name: p.name,
            description: p.description,
            code: p.code,
            total_quantity: p.total_quantity,
            available_quantity: p.available_quantity,
            price: p.price,
            category: p.category,
        }
    }
}

impl From<TruckPayload> for Truck {
    fn from(p: TruckPayload) -> Self {
        Self {
            id: 0,
            chassis_number: p.chassis_number,
            license_plate: p.license_plate,
        }
    }
}

impl From<OrderItemPayload> for OrderItem {
    fn from(p: OrderItemPayload) -> Self {
        Self {
            id: 0,
            item_id: p.item.filter(|i| *i != 0),
            order_id: None,
            quantity: p.quantity,
        }
    }
}

impl From<OrderPayload> for Order {
    fn from(p: OrderPayload) -> Self {
        Self {
            id: 0,
            code: p.code,
            submitted_date: p.submitted_date,
            deadline_date: p.deadline_date,
            user_id: p.user.filter(|u| *u != 0),
            order_items: p.order_items.into_iter().map(OrderItem::from).collect(),
        }
    }
}

// ── Partial-update merges ────────────────────────────────────────────────────

/// `password` must already be hashed by the caller when non-empty.
impl Merge<UserPayload> for User {
    fn merge(&mut self, patch: UserPayload) {
        overlay(&mut self.first_name, patch.first_name);
        overlay(&mut self.last_name, patch.last_name);
        overlay(&mut self.username, patch.username);
        overlay(&mut self.password, patch.password);
        overlay(&mut self.role_id, patch.role);
    }
}

impl Merge<RolePayload> for Role {
    fn merge(&mut self, patch: RolePayload) {
        overlay(&mut self.name, patch.name);
    }
}

impl Merge<ItemPayload> for Item {
    fn merge(&mut self, patch: ItemPayload) {
        overlay(&mut self.name, patch.name);
        overlay(&mut self.description, patch.description);
        overlay(&mut self.code, patch.code);
        overlay(&mut self.total_quantity, patch.total_quantity);
        overlay(&mut self.available_quantity, patch.available_quantity);
        overlay(&mut self.price, patch.price);
        overlay(&mut self.category, patch.category);
    }
}

impl Merge<TruckPayload> for Truck {
    fn merge(&mut self, patch: TruckPayload) {
        overlay(&mut self.chassis_number, patch.chassis_number);
        overlay(&mut self.license_plate, patch.license_plate);
    }
}

/// A non-empty `orderItems` replaces every existing line.
///
/// A replacement line equal to a current one (same item and quantity) takes
/// over that line's id, so repeating an update leaves the stored lines as
/// they were. Each current line is claimed at most once.
impl Merge<OrderPayload> for Order {
    fn merge(&mut self, patch: OrderPayload) {
        overlay(&mut self.code, patch.code);
        if patch.submitted_date.is_some() {
            self.submitted_date = patch.submitted_date;
        }
        if patch.deadline_date.is_some() {
            self.deadline_date = patch.deadline_date;
        }
        overlay(&mut self.user_id, patch.user);
        let lines: Vec<OrderItem> = patch
            .order_items
            .into_iter()
            .map(|p| OrderItem {
                order_id: Some(self.id),
                ..OrderItem::from(p)
            })
            .collect();
        if lines.is_empty() {
            return;
        }
        let mut current = std::mem::take(&mut self.order_items);
        self.order_items = lines
            .into_iter()
            .map(|mut line| {
                let same = current
                    .iter()
                    .position(|c| c.item_id == line.item_id && c.quantity == line.quantity);
                if let Some(pos) = same {
                    line.id = current.swap_remove(pos).id;
                }
                line
            })
            .collect();
    }
}
