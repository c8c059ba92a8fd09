//! HTTP and runtime plumbing shared by warehouse services.

pub mod config;
pub mod envelope;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
