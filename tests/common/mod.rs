//! Common test utilities and helpers
//!
//! - Database fixture (skips when `DATABASE_URL` is unset)
//! - Authentication helpers (users, tokens, test servers)
//! - Custom assertion macros

#![allow(dead_code)]

pub mod assertions;
pub mod auth_helpers;
pub mod database;

pub use auth_helpers::*;
pub use database::*;
