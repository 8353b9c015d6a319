/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server.
 *
 * # Initialization Process
 *
 * 1. Install the JWT settings from the configuration
 * 2. Load the optional database (and run migrations)
 * 3. Create the application state and chat hub
 * 4. Create and configure the router
 * 5. Start the periodic hub cleanup task
 */

use std::time::Duration;

use axum::Router;

use crate::backend::auth::sessions;
use crate::backend::realtime::ChatHub;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// How often channels without subscribers are dropped
pub const HUB_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Create and configure the Axum application
///
/// The function is resilient: a missing or unreachable database is logged
/// and the server starts without storage features.
pub async fn create_app(config: AppConfig) -> Router<()> {
    tracing::info!("Initializing ScoutLink backend server");

    sessions::init(config.jwt_secret.clone(), config.jwt_ttl_days);

    let db_pool = load_database(&config).await;
    let app_state = AppState::new(db_pool, config);

    let app = create_router(app_state.clone());

    spawn_hub_cleanup(app_state.hub.clone());
    tracing::info!("Router configured with periodic cleanup task");

    app
}

/// Start the periodic cleanup task for broadcast channels
pub fn spawn_hub_cleanup(hub: ChatHub) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(HUB_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = hub.cleanup_inactive_channels();
            tracing::debug!("Cleaned up {} inactive chat hub channels", removed);
        }
    })
}
