//! Administration Module
//!
//! User management and dashboard counts for administrators.

pub mod handlers;

pub use handlers::*;
