/**
 * Get Current User Handler
 *
 * This module implements the handler for GET /api/auth/me, which returns
 * information about the currently authenticated user. The route sits behind
 * `auth_middleware`, so the caller is already verified when this runs.
 */

use axum::{extract::State, response::Json};
use sqlx::PgPool;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::require_pool;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - If the caller is not authenticated
/// * `404 Not Found` - If the account was deleted after the token was issued
/// * `503 Service Unavailable` - If database is not configured
pub async fn get_me(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let pool = require_pool(pool)?;

    let record = get_user_by_id(&pool, user.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", user.user_id);
            BackendError::not_found("User not found")
        })?;

    Ok(Json(UserResponse::from(record)))
}
