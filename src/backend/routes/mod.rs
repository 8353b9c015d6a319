//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are organized by functionality into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, layers and fallback
//! ├── api_routes.rs   - Public and protected REST routes
//! └── chat_routes.rs  - Chat REST routes and the WebSocket
//! ```

/// Main router creation
pub mod router;

/// REST API route tables
pub mod api_routes;

/// Chat routes
pub mod chat_routes;

pub use router::create_router;
