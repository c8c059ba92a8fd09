//! Domain types shared across the warehouse crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod merge;
pub mod pagination;
pub mod role;
