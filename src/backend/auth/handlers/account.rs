/**
 * Account Handlers
 *
 * Profile maintenance for the signed-in user and public profile lookup:
 *
 * - `PUT /api/users/me` - update email, names, phone, location
 * - `PUT /api/users/me/password` - change password
 * - `GET /api/users/{id}` - public profile of any user
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::handlers::signup::{is_valid_email, validate_name, MIN_PASSWORD_LEN};
use crate::backend::auth::handlers::types::{
    ChangePasswordRequest, UpdateProfileRequest, UserResponse,
};
use crate::backend::auth::users::{
    get_user_by_email, get_user_by_id, update_password_hash, update_profile, ProfileChanges,
};
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::{ApiJson, ApiPath, AuthUser};
use crate::backend::server::state::require_pool;
use crate::shared::scouting::PublicProfile;

/// Trim optional text; an empty string clears nothing and is treated as absent
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validate and normalize a profile update
pub fn profile_changes(request: UpdateProfileRequest) -> Result<ProfileChanges, BackendError> {
    let changes = ProfileChanges {
        email: clean(request.email),
        first_name: clean(request.first_name),
        last_name: clean(request.last_name),
        phone_number: clean(request.phone_number),
        location: clean(request.location),
    };

    if let Some(email) = &changes.email {
        if !is_valid_email(email) {
            return Err(BackendError::bad_request("Invalid email format"));
        }
    }
    if let Some(first_name) = &changes.first_name {
        validate_name("first_name", first_name)?;
    }
    if let Some(last_name) = &changes.last_name {
        validate_name("last_name", last_name)?;
    }

    Ok(changes)
}

/// Update the caller's profile
pub async fn update_me(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let pool = require_pool(pool)?;
    let changes = profile_changes(request)?;

    if let Some(email) = &changes.email {
        if let Some(existing) = get_user_by_email(&pool, email).await? {
            if existing.id != user.user_id {
                return Err(BackendError::conflict("Email already registered"));
            }
        }
    }

    let updated = update_profile(&pool, user.user_id, changes)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    tracing::info!("Profile updated for {}", updated.username);
    Ok(Json(UserResponse::from(updated)))
}

/// Change the caller's password after checking the current one
pub async fn change_password(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<ChangePasswordRequest>,
) -> ApiResult<StatusCode> {
    let pool = require_pool(pool)?;

    if request.new_password.len() < MIN_PASSWORD_LEN {
        return Err(BackendError::bad_request(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    let record = get_user_by_id(&pool, user.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    let valid = verify(&request.current_password, &record.password_hash).map_err(|e| {
        tracing::error!("Password verification error: {:?}", e);
        BackendError::state("Password verification failed")
    })?;
    if !valid {
        tracing::warn!("Wrong current password for {}", record.username);
        return Err(BackendError::unauthorized("Current password is incorrect"));
    }

    let password_hash = hash(&request.new_password, DEFAULT_COST).map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        BackendError::state("Failed to hash password")
    })?;
    update_password_hash(&pool, user.user_id, &password_hash).await?;

    tracing::info!("Password changed for {}", record.username);
    Ok(StatusCode::NO_CONTENT)
}

/// Public profile of any user; contact details only for admins and the owner
pub async fn get_user_profile(
    State(pool): State<Option<PgPool>>,
    AuthUser(caller): AuthUser,
    ApiPath(user_id): ApiPath<Uuid>,
) -> ApiResult<Json<PublicProfile>> {
    let pool = require_pool(pool)?;

    let record = get_user_by_id(&pool, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    let include_contact = caller.role.is_admin() || caller.user_id == record.id;
    Ok(Json(record.to_public_profile(include_contact)))
}
