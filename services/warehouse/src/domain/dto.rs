//! Wire projections. None of these carry a password or audit timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{Item, Order, OrderItem, Role, Truck, User};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub role: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleDto {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub code: String,
    pub total_quantity: i32,
    pub available_quantity: i32,
    pub price: f64,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckDto {
    pub id: i32,
    pub chassis_number: String,
    pub license_plate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: i32,
    pub code: String,
    #[serde(serialize_with = "warehouse_core::serde::to_rfc3339_ms_opt")]
    pub submitted_date: Option<DateTime<Utc>>,
    #[serde(serialize_with = "warehouse_core::serde::to_rfc3339_ms_opt")]
    pub deadline_date: Option<DateTime<Utc>>,
    pub user: Option<i32>,
    pub order_items: Vec<OrderItemDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemDto {
    pub id: i32,
    pub item: Option<i32>,
    pub order: Option<i32>,
    pub quantity: i32,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            username: u.username,
            role: u.role_id,
        }
    }
}

impl From<Role> for RoleDto {
    fn from(r: Role) -> Self {
        Self {
            id: r.id,
            name: r.name,
        }
    }
}

impl From<Item> for ItemDto {
    fn from(i: Item) -> Self {
        Self {
            id: i.id,
            name: i.name,
            description: i.description,
            code: i.code,
            total_quantity: i.total_quantity,
            available_quantity: i.available_quantity,
            price: i.price,
            category: i.category,
        }
    }
}

impl From<Truck> for TruckDto {
    fn from(t: Truck) -> Self {
        Self {
            id: t.id,
            chassis_number: t.chassis_number,
            license_plate: t.license_plate,
        }
    }
}

impl From<OrderItem> for OrderItemDto {
    fn from(l: OrderItem) -> Self {
        Self {
            id: l.id,
            item: l.item_id,
            order: l.order_id,
            quantity: l.quantity,
        }
    }
}

impl From<Order> for OrderDto {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            code: o.code,
            submitted_date: o.submitted_date,
            deadline_date: o.deadline_date,
            user: o.user_id,
            order_items: o.order_items.into_iter().map(OrderItemDto::from).collect(),
        }
    }
}
