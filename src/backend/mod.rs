//! Backend Module
//!
//! This module contains all server-side code for ScoutLink.
//! It provides an Axum HTTP server backed by PostgreSQL, JWT authentication
//! and a WebSocket channel for chat and notifications.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, database loading
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Signup, login, JWT tokens, user accounts
//! - **`middleware`** - Authentication middleware and extractors
//! - **`advertisements`** - Player and club advertisements
//! - **`offers`** - Offers on advertisements and their decisions
//! - **`favorites`** - Bookmarked advertisements
//! - **`problems`** - Support tickets
//! - **`admin`** - User management and statistics
//! - **`export`** - CSV downloads
//! - **`chat`** - Two-party chats over REST and WebSocket
//! - **`realtime`** - Per-user broadcast channels
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── advertisements/ - Listings
//! ├── offers/         - Offers
//! ├── favorites/      - Bookmarks
//! ├── problems/       - Support tickets
//! ├── admin/          - Administration
//! ├── export/         - CSV export
//! ├── chat/           - Chats and messages
//! ├── realtime/       - Event hub
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! Every operation follows the same path: the handler validates the request
//! with the shared types, calls repository functions in the module's `db`
//! file, maps rows to transfer objects and returns JSON. Failures are
//! `BackendError`s, which render as `{"error": "...", "status": N}`.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Player and club advertisements
pub mod advertisements;

/// Offers on advertisements
pub mod offers;

/// Favorite advertisements
pub mod favorites;

/// Support tickets
pub mod problems;

/// Administrator endpoints
pub mod admin;

/// CSV export
pub mod export;

/// Chat REST and WebSocket handlers
pub mod chat;

/// Real-time update system
pub mod realtime;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use error::BackendError;
pub use realtime::ChatHub;
pub use server::create_app;
