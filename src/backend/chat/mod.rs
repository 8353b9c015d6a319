//! Chat Module
//!
//! Two-party conversations. Messages are stored in PostgreSQL and pushed
//! to both participants through the `ChatHub` as soon as they are saved,
//! whether they were sent over REST or over the WebSocket.

pub mod db;
pub mod handlers;

pub use handlers::*;
