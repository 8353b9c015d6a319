/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct holds:
 * - The optional PostgreSQL pool
 * - The chat hub (per-user broadcast channels)
 * - The loaded configuration
 *
 * # State Extraction
 *
 * Handlers that only need the database take `State<Option<PgPool>>`;
 * handlers that push real-time events take `State<AppState>` or
 * `State<ChatHub>`.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::error::BackendError;
use crate::backend::realtime::ChatHub;
use crate::shared::AppConfig;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    ///
    /// This is `None` if the database is not configured (e.g., if
    /// `DATABASE_URL` is not set). Storage-backed handlers answer 503.
    pub db_pool: Option<PgPool>,

    /// Per-user real-time channels for chat messages and notifications
    pub hub: ChatHub,

    /// Loaded configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db_pool: Option<PgPool>, config: AppConfig) -> Self {
        Self {
            db_pool,
            hub: ChatHub::new(),
            config: Arc::new(config),
        }
    }

    /// Database pool, or 503 when the server runs without one
    pub fn pool(&self) -> Result<&PgPool, BackendError> {
        self.db_pool.as_ref().ok_or_else(|| {
            tracing::error!("Database not configured");
            BackendError::DatabaseUnavailable
        })
    }
}

/// Unwrap an extracted optional pool, or 503 when the server runs without one
pub fn require_pool(pool: Option<PgPool>) -> Result<PgPool, BackendError> {
    pool.ok_or_else(|| {
        tracing::error!("Database not configured");
        BackendError::DatabaseUnavailable
    })
}

impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for ChatHub {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.hub.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
