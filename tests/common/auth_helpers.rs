//! Authentication test helpers
//!
//! Test servers, users and tokens. Every helper installs the session
//! settings from `AppConfig::default()` first so tokens created here are
//! accepted by the server under test.

use axum_test::TestServer;
use serde_json::{json, Value};
use uuid::Uuid;

use scoutlink::backend::auth::sessions;
use scoutlink::backend::routes::create_router;
use scoutlink::backend::server::AppState;
use scoutlink::shared::scouting::UserRole;
use scoutlink::shared::AppConfig;

pub const TEST_PASSWORD: &str = "correct-horse-1";

/// A user signed up through the API
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub token: String,
    pub role: String,
}

pub fn init_sessions() {
    let config = AppConfig::default();
    sessions::init(config.jwt_secret, config.jwt_ttl_days);
}

/// A server with no database behind it
pub fn server_without_database() -> TestServer {
    init_sessions();
    let state = AppState::new(None, AppConfig::default());
    TestServer::new(create_router(state)).expect("Failed to start test server")
}

/// A server talking to the test database
pub async fn server_with_database(database_url: &str) -> TestServer {
    init_sessions();
    let config = AppConfig {
        database_url: Some(database_url.to_string()),
        ..AppConfig::default()
    };
    let app = scoutlink::backend::create_app(config).await;
    TestServer::new(app).expect("Failed to start test server")
}

/// Token for a user that only exists in the claims
pub fn generate_test_token(user_id: Uuid, role: UserRole) -> String {
    init_sessions();
    sessions::create_token(user_id, format!("{}@example.com", user_id), role)
        .expect("Failed to generate test token")
}

/// Sign a new user up through the API
pub async fn signup_user(server: &TestServer, username: &str) -> TestUser {
    let email = format!("{}@example.com", username);
    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": username,
            "email": email,
            "password": TEST_PASSWORD,
            "first_name": "Test",
            "last_name": username,
        }))
        .await;
    assert_eq!(response.status_code(), 201, "signup failed: {}", response.text());

    let body: Value = response.json();
    TestUser {
        id: body["user"]["id"]
            .as_str()
            .and_then(|id| Uuid::parse_str(id).ok())
            .expect("user id in signup response"),
        username: username.to_string(),
        email,
        token: body["token"].as_str().expect("token in signup response").to_string(),
        role: body["user"]["role"].as_str().unwrap_or_default().to_string(),
    }
}
