/**
 * Favorite Handlers
 *
 * # Routes
 *
 * - `GET    /api/favorites/player-advertisements`
 * - `POST   /api/favorites/player-advertisements/{id}`
 * - `DELETE /api/favorites/player-advertisements/{id}`
 * - `GET    /api/favorites/player-advertisements/{id}/exists`
 * - the same set under `/api/favorites/club-advertisements`
 */

use axum::{
    extract::State,
    response::Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::advertisements::db as ads;
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::favorites::db;
use crate::backend::middleware::{ApiPath, AuthUser};
use crate::backend::server::state::require_pool;
use crate::shared::scouting::{
    AdvertisementKind, ClubAdvertisement, FavoriteExistsResponse, FavoriteResponse,
    PlayerAdvertisement,
};

async fn advertisement_owner(
    pool: &PgPool,
    kind: AdvertisementKind,
    id: Uuid,
) -> Result<Option<Uuid>, BackendError> {
    Ok(match kind {
        AdvertisementKind::Player => ads::get_player_advertisement(pool, id)
            .await?
            .map(|ad| ad.player_id),
        AdvertisementKind::Club => ads::get_club_advertisement(pool, id)
            .await?
            .map(|ad| ad.club_member_id),
    })
}

async fn add(
    pool: Option<PgPool>,
    user_id: Uuid,
    kind: AdvertisementKind,
    id: Uuid,
) -> ApiResult<Json<FavoriteResponse>> {
    let pool = require_pool(pool)?;
    let owner = advertisement_owner(&pool, kind, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Advertisement not found"))?;
    if owner == user_id {
        return Err(BackendError::bad_request("You cannot favorite your own advertisement"));
    }

    if db::add_favorite(&pool, user_id, kind, id).await? {
        tracing::debug!("User {} favorited {} advertisement {}", user_id, kind.as_str(), id);
    }
    Ok(Json(FavoriteResponse {
        advertisement_id: id,
        kind,
        is_favorite: true,
    }))
}

async fn remove(
    pool: Option<PgPool>,
    user_id: Uuid,
    kind: AdvertisementKind,
    id: Uuid,
) -> ApiResult<Json<FavoriteResponse>> {
    let pool = require_pool(pool)?;
    db::remove_favorite(&pool, user_id, kind, id).await?;
    Ok(Json(FavoriteResponse {
        advertisement_id: id,
        kind,
        is_favorite: false,
    }))
}

async fn exists(
    pool: Option<PgPool>,
    user_id: Uuid,
    kind: AdvertisementKind,
    id: Uuid,
) -> ApiResult<Json<FavoriteExistsResponse>> {
    let pool = require_pool(pool)?;
    let exists = db::favorite_exists(&pool, user_id, kind, id).await?;
    Ok(Json(FavoriteExistsResponse { exists }))
}

pub async fn list_favorite_player_advertisements(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<Vec<PlayerAdvertisement>>> {
    let pool = require_pool(pool)?;
    Ok(Json(db::favorite_player_advertisements(&pool, user.user_id).await?))
}

pub async fn add_favorite_player_advertisement(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<FavoriteResponse>> {
    add(pool, user.user_id, AdvertisementKind::Player, id).await
}

pub async fn remove_favorite_player_advertisement(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<FavoriteResponse>> {
    remove(pool, user.user_id, AdvertisementKind::Player, id).await
}

pub async fn favorite_player_advertisement_exists(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<FavoriteExistsResponse>> {
    exists(pool, user.user_id, AdvertisementKind::Player, id).await
}

pub async fn list_favorite_club_advertisements(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<Vec<ClubAdvertisement>>> {
    let pool = require_pool(pool)?;
    Ok(Json(db::favorite_club_advertisements(&pool, user.user_id).await?))
}

pub async fn add_favorite_club_advertisement(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<FavoriteResponse>> {
    add(pool, user.user_id, AdvertisementKind::Club, id).await
}

pub async fn remove_favorite_club_advertisement(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<FavoriteResponse>> {
    remove(pool, user.user_id, AdvertisementKind::Club, id).await
}

pub async fn favorite_club_advertisement_exists(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<FavoriteExistsResponse>> {
    exists(pool, user.user_id, AdvertisementKind::Club, id).await
}
