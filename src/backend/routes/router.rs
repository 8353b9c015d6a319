/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Public API routes
 * 2. Protected API and chat routes, wrapped in `auth_middleware`
 * 3. The chat WebSocket
 * 4. Fallback: JSON 404 under `/api/`, otherwise the static client
 *    (unknown paths get `index.html` so client-side routing works)
 *
 * Tracing and CORS layers wrap the whole router.
 */

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method},
    middleware,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use tower::{ServiceBuilder, ServiceExt};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::backend::error::BackendError;
use crate::backend::middleware::auth_middleware;
use crate::backend::routes::api_routes::{configure_protected_routes, configure_public_routes};
use crate::backend::routes::chat_routes::{configure_chat_routes, configure_socket_routes};
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub connections: usize,
}

/// `GET /api/health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        database: state.db_pool.is_some(),
        connections: state.hub.channel_count(),
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let protected = configure_chat_routes(configure_protected_routes(Router::new())).route_layer(
        middleware::from_fn_with_state(app_state.clone(), auth_middleware),
    );

    let router = configure_public_routes(Router::new())
        .route("/api/health", get(health))
        .merge(protected);
    let router = configure_socket_routes(router).fallback(fallback);

    let cors = cors_layer(&app_state.config.cors_origins);

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(app_state)
}

/// CORS for the configured origins; an empty list allows any origin
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
}

async fn fallback(State(config): State<Arc<AppConfig>>, request: Request) -> Response {
    let path = request.uri().path();
    if path.starts_with("/api/") || path.starts_with("/ws/") {
        return BackendError::not_found("Route not found").into_response();
    }

    let index = Path::new(&config.static_dir).join("index.html");
    let static_files = ServeDir::new(&config.static_dir).fallback(ServeFile::new(index));
    match static_files.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
