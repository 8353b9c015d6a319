// Increase recursion limit for complex async operations
#![recursion_limit = "256"]

//! ScoutLink - Main Library
//!
//! ScoutLink is a football scouting marketplace backend. Players advertise
//! themselves to clubs, club members advertise open positions, and both
//! sides answer each other's listings with offers, bookmark listings and
//! chat in real time. Administrators manage accounts and support tickets.
//!
//! # Module Structure
//!
//! - **`shared`** - Types that do not depend on the server runtime
//!   - Advertisements, offers, problems, chats and their validation rules
//!   - Real-time event envelopes
//!   - Configuration loading and error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server and WebSocket chat endpoint
//!   - JWT authentication and role checks
//!   - PostgreSQL persistence through `sqlx`
//!   - CSV exports for administrators
//!
//! # Feature Flags
//!
//! - **`ssr`** - Enables the backend modules (enabled by default)
//!
//! # Usage
//!
//! ```rust,no_run
//! use scoutlink::shared::AppConfig;
//! use scoutlink::backend::server::init::create_app;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let app = create_app(config).await;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod shared;

#[cfg(feature = "ssr")]
pub mod backend;
