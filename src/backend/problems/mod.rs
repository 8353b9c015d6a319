//! Problems Module
//!
//! Support tickets reported by users and reviewed by administrators.

pub mod db;
pub mod handlers;

pub use handlers::*;
