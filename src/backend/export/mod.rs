//! Export Module
//!
//! CSV downloads for administrators and for a user's received offers.

pub mod csv;
pub mod handlers;

pub use handlers::*;
