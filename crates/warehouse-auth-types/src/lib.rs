//! Auth types shared across warehouse crates.
//!
//! Provides JWT issuance and validation, `Authorization` header parsing and
//! bcrypt password hashing.

pub mod bearer;
pub mod password;
pub mod token;
