/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT token generation and validation for user sessions.
 * The signing secret and token lifetime come from `AppConfig` through
 * `init`; before `init` runs (unit tests, tools) the `JWT_SECRET`
 * environment variable and the development defaults are used.
 */

use std::sync::OnceLock;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::config::{DEFAULT_JWT_TTL_DAYS, DEV_JWT_SECRET};
use crate::shared::scouting::UserRole;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Email
    pub email: String,
    /// Role at the time the token was issued
    #[serde(default)]
    pub role: UserRole,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

struct SessionSettings {
    secret: String,
    ttl_days: i64,
}

static SETTINGS: OnceLock<SessionSettings> = OnceLock::new();

/// Install the signing secret and token lifetime. Only the first call wins.
pub fn init(secret: impl Into<String>, ttl_days: i64) {
    let installed = SETTINGS
        .set(SessionSettings {
            secret: secret.into(),
            ttl_days,
        })
        .is_ok();
    if !installed {
        tracing::debug!("Session settings already initialized");
    }
}

/// Get JWT secret from settings or environment
fn get_jwt_secret() -> String {
    if let Some(settings) = SETTINGS.get() {
        return settings.secret.clone();
    }
    std::env::var("JWT_SECRET").unwrap_or_else(|_| DEV_JWT_SECRET.to_string())
}

fn get_ttl_days() -> i64 {
    SETTINGS
        .get()
        .map(|settings| settings.ttl_days)
        .unwrap_or(DEFAULT_JWT_TTL_DAYS)
}

/// Create a JWT token for a user
///
/// # Arguments
/// * `user_id` - User ID (UUID)
/// * `email` - User email
/// * `role` - User role, copied into the claims
///
/// # Returns
/// JWT token string
pub fn create_token(
    user_id: Uuid,
    email: String,
    role: UserRole,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let exp = now + Duration::days(get_ttl_days());

    let claims = Claims {
        sub: user_id.to_string(),
        email,
        role,
        exp: exp.timestamp().max(0) as u64,
        iat: now.timestamp().max(0) as u64,
    };

    let secret = get_jwt_secret();
    let key = EncodingKey::from_secret(secret.as_ref());

    encode(&Header::default(), &claims, &key)
}

/// Verify and decode a JWT token
///
/// # Returns
/// Decoded claims or error (bad signature, expired, malformed)
pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let secret = get_jwt_secret();
    let key = DecodingKey::from_secret(secret.as_ref());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}

/// Extract user ID from token
pub fn get_user_id_from_token(token: &str) -> Result<Uuid, String> {
    let claims = verify_token(token).map_err(|e| format!("Token verification failed: {}", e))?;
    Uuid::parse_str(&claims.sub).map_err(|e| format!("Invalid user ID in token: {}", e))
}
