//! Offers Module
//!
//! Offers made on advertisements and the decisions taken on them.

pub mod db;
pub mod handlers;

pub use handlers::*;
