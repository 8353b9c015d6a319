//! Advertisements Module
//!
//! Player advertisements (a player looking for a club) and club
//! advertisements (a club looking for a player). Listings are public;
//! creating, editing and deleting require a signed-in owner or an admin.
//! An advertisement is active while its end date lies in the future.

pub mod db;
pub mod handlers;

pub use handlers::*;
