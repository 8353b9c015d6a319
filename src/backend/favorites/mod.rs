//! Favorites Module
//!
//! User-scoped bookmarks on player and club advertisements.

pub mod db;
pub mod handlers;

pub use handlers::*;
