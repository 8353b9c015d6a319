//! Routing, lookup lists and the error envelope

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use scoutlink::shared::scouting::UserRole;
use uuid::Uuid;

use crate::common::{generate_test_token, server_without_database};

#[tokio::test]
async fn test_health_reports_missing_database() {
    let server = server_without_database();

    let response = server.get("/api/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], false);
}

#[tokio::test]
async fn test_lookup_lists_are_public() {
    let server = server_without_database();

    let positions: Value = server.get("/api/positions").await.json();
    let positions = positions.as_array().expect("positions array");
    assert_eq!(positions.len(), 10);
    assert_eq!(positions[0]["code"], "GK");

    let feet: Value = server.get("/api/preferred-feet").await.json();
    assert_eq!(feet, serde_json::json!(["left", "right", "both"]));

    let statuses: Value = server.get("/api/offer-statuses").await.json();
    assert_eq!(statuses.as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_public_listing_without_database_is_unavailable() {
    let server = server_without_database();

    let response = server.get("/api/player-advertisements").await;
    crate::assert_error_body!(response, StatusCode::SERVICE_UNAVAILABLE);

    let response = server.get("/api/club-advertisements?position=striker&page=2").await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_unknown_api_route_is_json_404() {
    let server = server_without_database();

    let response = server.get("/api/does-not-exist").await;
    crate::assert_error_body!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bad_path_parameter_is_rejected() {
    let server = server_without_database();

    let response = server.get("/api/player-advertisements/not-a-uuid").await;
    crate::assert_error_body!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_enum_in_body_is_json_400() {
    let server = server_without_database();
    let token = generate_test_token(Uuid::new_v4(), UserRole::User);

    let response = server
        .post("/api/player-advertisements")
        .authorization_bearer(&token)
        .json(&serde_json::json!({
            "position": "libero",
            "league": "Serie A",
            "region": "Milan",
            "age": 24,
            "height": 181,
            "preferred_foot": "right",
            "salary_range": {"min": 1000.0, "max": 2000.0}
        }))
        .await;
    crate::assert_error_body!(response, StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    crate::assert_contains!(body["error"].as_str().unwrap_or_default(), "libero");
}

#[tokio::test]
async fn test_malformed_body_is_json_400() {
    let server = server_without_database();
    let token = generate_test_token(Uuid::new_v4(), UserRole::User);

    let response = server
        .post("/api/problems")
        .authorization_bearer(&token)
        .content_type("application/json")
        .bytes("{not json".into())
        .await;
    crate::assert_error_body!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_sort_in_query_is_json_400() {
    let server = server_without_database();

    let response = server.get("/api/player-advertisements?sort=cheapest").await;
    crate::assert_error_body!(response, StatusCode::BAD_REQUEST);

    let response = server.get("/api/club-advertisements?page=first").await;
    crate::assert_error_body!(response, StatusCode::BAD_REQUEST);
}
