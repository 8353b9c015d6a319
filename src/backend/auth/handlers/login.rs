/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by username, then by email
 * 2. Verify password using bcrypt
 * 3. Generate JWT token
 * 4. Return token and user info
 *
 * Unknown users and wrong passwords both return 401 with the same message.
 */
use axum::{extract::State, response::Json};
use bcrypt::verify;
use sqlx::PgPool;

use crate::backend::middleware::ApiJson;
use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest, UserResponse};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::get_user_by_login;
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::server::state::require_pool;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `503 Service Unavailable` - If database is not configured
/// * `500 Internal Server Error` - If database query or token generation fails
pub async fn login(
    State(pool): State<Option<PgPool>>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let pool = require_pool(pool)?;
    tracing::info!("Login request for: {}", request.username);

    let user = get_user_by_login(&pool, request.username.trim())
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", request.username);
            BackendError::unauthorized(INVALID_CREDENTIALS)
        })?;

    let valid = verify(&request.password, &user.password_hash).map_err(|e| {
        tracing::error!("Password verification error: {:?}", e);
        BackendError::state("Password verification failed")
    })?;

    if !valid {
        tracing::warn!("Invalid password for user: {}", request.username);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = create_token(user.id, user.email.clone(), user.role()).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::state("Failed to create token")
    })?;

    tracing::info!("User logged in successfully: {} ({})", user.username, user.email);

    Ok(Json(AuthResponse {
        token,
        user: UserResponse::from(user),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_login_no_database() {
        let request = LoginRequest {
            username: "ada_okafor".to_string(),
            password: "password123".to_string(),
        };
        let result = login(State(None), ApiJson(request)).await;
        assert_eq!(
            result.unwrap_err().status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
