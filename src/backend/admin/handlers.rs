/**
 * Administration Handlers
 *
 * # Routes
 *
 * - `GET    /api/admin/users?search=&page=&page_size=`
 * - `PUT    /api/admin/users/{id}/role`
 * - `DELETE /api/admin/users/{id}`
 * - `GET    /api/admin/stats`
 *
 * Every handler takes `AdminUser`, so non-admins get 403 before any
 * storage is touched.
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::handlers::UserResponse;
use crate::backend::auth::users;
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::{AdminUser, ApiJson, ApiPath, ApiQuery};
use crate::backend::server::state::require_pool;
use crate::backend::{advertisements, offers, problems};
use crate::shared::scouting::{escape_like, Page, UserRole};

const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;

/// Query string for `GET /api/admin/users`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UsersQuery {
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl UsersQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    /// `%term%` for ILIKE with wildcards in the term escaped, or None for a
    /// blank search
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SetRoleRequest {
    pub role: UserRole,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AdminStats {
    pub users: i64,
    pub active_player_advertisements: i64,
    pub active_club_advertisements: i64,
    pub pending_offers: i64,
    pub unsolved_problems: i64,
}

pub async fn list_users(
    State(pool): State<Option<PgPool>>,
    AdminUser(_admin): AdminUser,
    ApiQuery(query): ApiQuery<UsersQuery>,
) -> ApiResult<Json<Page<UserResponse>>> {
    let pool = require_pool(pool)?;
    let page_size = query.page_size();
    let offset = i64::from(query.page() - 1) * i64::from(page_size);
    let pattern = query.search_pattern();

    let (rows, total) =
        users::list_users(&pool, pattern.as_deref(), i64::from(page_size), offset).await?;

    Ok(Json(Page {
        items: rows.into_iter().map(UserResponse::from).collect(),
        total,
        page: query.page(),
        page_size,
    }))
}

pub async fn set_user_role(
    State(pool): State<Option<PgPool>>,
    AdminUser(admin): AdminUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<SetRoleRequest>,
) -> ApiResult<Json<UserResponse>> {
    let pool = require_pool(pool)?;
    if id == admin.user_id && !request.role.is_admin() {
        return Err(BackendError::bad_request("You cannot remove your own administrator role"));
    }

    let user = users::set_role(&pool, id, request.role)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    tracing::info!("User {} is now {} (changed by {})", id, request.role.as_str(), admin.user_id);
    Ok(Json(UserResponse::from(user)))
}

pub async fn delete_user(
    State(pool): State<Option<PgPool>>,
    AdminUser(admin): AdminUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<StatusCode> {
    let pool = require_pool(pool)?;
    if id == admin.user_id {
        return Err(BackendError::bad_request("You cannot delete your own account"));
    }

    if !users::delete_user(&pool, id).await? {
        return Err(BackendError::not_found("User not found"));
    }

    tracing::info!("User {} deleted by {}", id, admin.user_id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn stats(
    State(pool): State<Option<PgPool>>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<Json<AdminStats>> {
    let pool = require_pool(pool)?;

    let users = users::count_users(&pool).await?;
    let (active_player_advertisements, active_club_advertisements) =
        advertisements::db::count_active(&pool, Utc::now()).await?;
    let pending_offers = offers::db::count_pending(&pool).await?;
    let unsolved_problems = problems::db::count_unsolved(&pool).await?;

    Ok(Json(AdminStats {
        users,
        active_player_advertisements,
        active_club_advertisements,
        pending_offers,
        unsolved_problems,
    }))
}
