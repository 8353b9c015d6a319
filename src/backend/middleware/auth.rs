/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies JWT tokens from the
 * Authorization header and provides the user to handlers.
 *
 * The role is re-read from the database on every request so that a
 * promotion, demotion or deletion takes effect without waiting for the
 * token to expire.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::verify_token;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::scouting::UserRole;

/// Authenticated user data extracted from JWT token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    /// Owners and administrators may change or delete a resource
    pub fn can_manage(&self, owner_id: Uuid) -> bool {
        self.user_id == owner_id || self.role.is_admin()
    }
}

/// Extract the token from a `Bearer <token>` Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, BackendError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            BackendError::unauthorized("Missing Authorization header")
        })?;

    auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        BackendError::unauthorized("Invalid Authorization header format")
    })
}

/// Verify a token and resolve the user it belongs to
///
/// Without a database the claims are trusted as issued.
pub async fn authenticate(state: &AppState, token: &str) -> Result<AuthenticatedUser, BackendError> {
    let claims = verify_token(token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthorized("Invalid or expired token")
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|e| {
        tracing::warn!("Invalid user ID in token: {:?}", e);
        BackendError::unauthorized("Invalid or expired token")
    })?;

    match &state.db_pool {
        Some(pool) => {
            let user = get_user_by_id(pool, user_id).await?.ok_or_else(|| {
                tracing::warn!("User not found in database: {}", user_id);
                BackendError::unauthorized("User no longer exists")
            })?;
            let role = user.role();
            Ok(AuthenticatedUser {
                user_id,
                email: user.email,
                role,
            })
        }
        None => Ok(AuthenticatedUser {
            user_id,
            email: claims.email,
            role: claims.role,
        }),
    }
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts JWT token from Authorization header
/// 2. Verifies the token and the user behind it
/// 3. Attaches user data to request extensions for use in handlers
///
/// Returns 401 Unauthorized if token is missing or invalid
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(request.headers())?;
    let user = authenticate(&app_state, token).await?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Extract authenticated user from request extensions
pub fn extract_authenticated_user(request: &Request) -> Result<AuthenticatedUser, BackendError> {
    request
        .extensions()
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| {
            tracing::warn!("AuthenticatedUser not found in request extensions");
            BackendError::unauthorized("Authentication required")
        })
}

/// Axum extractor for authenticated user
///
/// Uses the user attached by `auth_middleware` when present. Routes that
/// mix public and protected methods on one path authenticate here instead.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(AuthUser(user.clone()));
        }

        let token = bearer_token(&parts.headers)?;
        let user = authenticate(state, token).await?;
        parts.extensions.insert(user.clone());
        Ok(AuthUser(user))
    }
}

/// Axum extractor that additionally requires the admin role
#[derive(Clone, Debug)]
pub struct AdminUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = BackendError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.is_admin() {
            tracing::warn!("User {} attempted an admin operation", user.user_id);
            return Err(BackendError::forbidden("Administrator role required"));
        }
        Ok(AdminUser(user))
    }
}
