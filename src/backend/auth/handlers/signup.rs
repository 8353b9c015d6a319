/**
 * Signup Handler
 *
 * This module implements the user registration handler for POST /api/auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate username, email, password and names
 * 2. Check if username or email already exists
 * 3. Hash password using bcrypt
 * 4. Create user in database (the first account becomes an administrator)
 * 5. Generate JWT token
 * 6. Return token and user info
 */

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;

use crate::backend::middleware::ApiJson;
use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest, UserResponse};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::{create_user, get_user_by_email, get_user_by_username, NewUser};
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::server::state::require_pool;

pub const MIN_PASSWORD_LEN: usize = 8;
const MAX_NAME_LEN: usize = 100;

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
pub fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Basic shape check: something before and after a single '@'
pub fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

pub(crate) fn validate_name(field: &str, value: &str) -> Result<(), BackendError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_NAME_LEN {
        return Err(BackendError::bad_request(format!(
            "{} must be 1-{} characters",
            field, MAX_NAME_LEN
        )));
    }
    Ok(())
}

/// Validate a signup request without touching the database
pub fn validate_signup(request: &SignupRequest) -> Result<(), BackendError> {
    if !is_valid_username(&request.username) {
        tracing::warn!("Invalid username format: {}", request.username);
        return Err(BackendError::bad_request(
            "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
        ));
    }

    if !is_valid_email(&request.email) {
        tracing::warn!("Invalid email format: {}", request.email);
        return Err(BackendError::bad_request("Invalid email format"));
    }

    if request.password.len() < MIN_PASSWORD_LEN {
        tracing::warn!("Password too short");
        return Err(BackendError::bad_request(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    validate_name("first_name", &request.first_name)?;
    validate_name("last_name", &request.last_name)?;
    Ok(())
}

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - If any field fails validation
/// * `409 Conflict` - If the username or email is taken
/// * `503 Service Unavailable` - If database is not configured
/// * `500 Internal Server Error` - If hashing, storage or token generation fails
///
/// # Example Request
///
/// ```http
/// POST /api/auth/signup HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "ada_okafor",
///   "email": "ada@example.com",
///   "password": "securepassword123",
///   "first_name": "Ada",
///   "last_name": "Okafor"
/// }
/// ```
pub async fn signup(
    State(pool): State<Option<PgPool>>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let pool = require_pool(pool)?;
    tracing::info!("Signup request for username: {}, email: {}", request.username, request.email);

    validate_signup(&request)?;

    if get_user_by_username(&pool, &request.username).await?.is_some() {
        tracing::warn!("Username already exists: {}", request.username);
        return Err(BackendError::conflict("Username already taken"));
    }

    if get_user_by_email(&pool, &request.email).await?.is_some() {
        tracing::warn!("Email already exists: {}", request.email);
        return Err(BackendError::conflict("Email already registered"));
    }

    let password_hash = hash(&request.password, DEFAULT_COST).map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        BackendError::state("Failed to hash password")
    })?;

    let user = create_user(
        &pool,
        NewUser {
            username: request.username.trim().to_string(),
            email: request.email.trim().to_string(),
            password_hash,
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            phone_number: request.phone_number.filter(|p| !p.trim().is_empty()),
            location: request.location.filter(|l| !l.trim().is_empty()),
        },
    )
    .await?;

    let token = create_token(user.id, user.email.clone(), user.role()).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::state("Failed to create token")
    })?;

    tracing::info!(
        "User created successfully: {} ({}) as {}",
        user.username,
        user.email,
        user.role
    );

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserResponse::from(user),
        }),
    ))
}
