//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the HTTP API, the WebSocket channel and the single-page client. All types
//! are designed for JSON serialization.
//!
//! # Overview
//!
//! The shared module has no dependency on the server stack (axum, sqlx
//! pools), so it compiles without the `ssr` feature.

/// Real-time event system
pub mod event;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Marketplace domain types
pub mod scouting;

/// Re-export commonly used types for convenience
pub use event::{RealtimeEvent, EventType};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
