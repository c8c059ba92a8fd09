pub mod auth;
pub mod item;
pub mod order;
pub mod role;
pub mod truck;
pub mod user;

#[cfg(test)]
mod mock;
