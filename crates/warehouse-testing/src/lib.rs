//! Test utilities for warehouse services.
//!
//! Provides `MockAuth` for minting real bearer headers.
//! Import from dev-dependencies only; never in production code.

pub mod auth;
