//! Authentication at the routing layer

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::{TestRequest, TestServer};
use uuid::Uuid;

use crate::common::{generate_test_token, server_without_database};
use scoutlink::shared::scouting::UserRole;

#[tokio::test]
async fn test_protected_routes_require_token() {
    let server = server_without_database();

    for path in [
        "/api/auth/me",
        "/api/chats",
        "/api/player-offers/received",
        "/api/favorites/club-advertisements",
        "/api/problems/mine",
        "/api/admin/stats",
        "/api/users/me/export/offers.csv",
    ] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{}", path);
    }
}

#[tokio::test]
async fn test_invalid_token_is_unauthorized() {
    let server = server_without_database();

    let response = server
        .get("/api/auth/me")
        .authorization_bearer("not-a-jwt")
        .await;
    crate::assert_error_body!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_creating_advertisement_requires_token() {
    let server = server_without_database();

    let response = server
        .post("/api/club-advertisements")
        .json(&serde_json::json!({
            "club_name": "Harbour FC",
            "position": "striker",
            "league": "Premier",
            "region": "North",
            "salary_range": {"min": 1000.0, "max": 2000.0}
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_reaches_handler() {
    let server = server_without_database();
    let token = generate_test_token(Uuid::new_v4(), UserRole::User);

    // Authentication passes; the handler then needs the database
    let response = server.get("/api/auth/me").authorization_bearer(&token).await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_admin_routes_forbid_regular_users() {
    let server = server_without_database();
    let token = generate_test_token(Uuid::new_v4(), UserRole::User);

    let response = server.get("/api/admin/stats").authorization_bearer(&token).await;
    crate::assert_error_body!(response, StatusCode::FORBIDDEN);

    let response = server
        .get("/api/admin/export/users.csv")
        .authorization_bearer(&token)
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_token_passes_role_check() {
    let server = server_without_database();
    let token = generate_test_token(Uuid::new_v4(), UserRole::Admin);

    let response = server.get("/api/admin/stats").authorization_bearer(&token).await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

/// A GET carrying every header a browser sends to open a WebSocket
fn socket_request(server: &TestServer, path: &str) -> TestRequest {
    server
        .get(path)
        .add_header(header::CONNECTION, HeaderValue::from_static("upgrade"))
        .add_header(header::UPGRADE, HeaderValue::from_static("websocket"))
        .add_header(header::SEC_WEBSOCKET_VERSION, HeaderValue::from_static("13"))
        .add_header(
            header::SEC_WEBSOCKET_KEY,
            HeaderValue::from_static("dGhlIHNhbXBsZSBub25jZQ=="),
        )
}

#[tokio::test]
async fn test_socket_rejects_missing_token() {
    let server = server_without_database();

    let response = socket_request(&server, "/ws/chat").await;
    crate::assert_error_body!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_socket_rejects_invalid_token() {
    let server = server_without_database();

    let response = socket_request(&server, "/ws/chat?access_token=not-a-jwt").await;
    crate::assert_error_body!(response, StatusCode::UNAUTHORIZED);

    let response = socket_request(&server, "/ws/chat")
        .authorization_bearer("not-a-jwt")
        .await;
    crate::assert_error_body!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_socket_accepts_query_token() {
    let server = server_without_database();
    let token = generate_test_token(Uuid::new_v4(), UserRole::User);

    let response = socket_request(&server, &format!("/ws/chat?access_token={}", token)).await;
    assert_ne!(response.status_code(), StatusCode::UNAUTHORIZED);
}
