/**
 * Advertisement Handlers
 *
 * # Routes
 *
 * - `GET    /api/player-advertisements`        - public listing
 * - `GET    /api/player-advertisements/{id}`   - public detail
 * - `POST   /api/player-advertisements`        - create (caller is the player)
 * - `PUT    /api/player-advertisements/{id}`   - update (owner or admin)
 * - `DELETE /api/player-advertisements/{id}`   - delete (owner or admin)
 * - `GET    /api/users/me/player-advertisements`
 * - the same set under `club-advertisements`
 * - `GET    /api/positions`, `GET /api/preferred-feet` - lookup lists
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::advertisements::db;
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::{ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::backend::server::state::require_pool;
use crate::shared::scouting::{
    AdvertisementQuery, ClubAdvertisement, CreateClubAdvertisementRequest,
    CreatePlayerAdvertisementRequest, Page, PlayerAdvertisement, Position, PositionInfo,
    PreferredFoot, UpdateAdvertisementRequest,
};

pub async fn list_player_advertisements(
    State(pool): State<Option<PgPool>>,
    ApiQuery(query): ApiQuery<AdvertisementQuery>,
) -> ApiResult<Json<Page<PlayerAdvertisement>>> {
    let pool = require_pool(pool)?;
    let filters = db::ListFilters::from_query(&query, None, Utc::now())?;
    Ok(Json(db::list_player_advertisements(&pool, &query, &filters).await?))
}

pub async fn get_player_advertisement(
    State(pool): State<Option<PgPool>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<PlayerAdvertisement>> {
    let pool = require_pool(pool)?;
    let advertisement = db::get_player_advertisement(&pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Player advertisement not found"))?;
    Ok(Json(advertisement))
}

pub async fn create_player_advertisement(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreatePlayerAdvertisementRequest>,
) -> ApiResult<(StatusCode, Json<PlayerAdvertisement>)> {
    let pool = require_pool(pool)?;
    let end_date = request.validate(Utc::now())?;

    let id = db::create_player_advertisement(&pool, user.user_id, &request, end_date).await?;
    let advertisement = db::get_player_advertisement(&pool, id)
        .await?
        .ok_or_else(|| BackendError::state("Created advertisement not readable"))?;

    tracing::info!(
        "Player advertisement {} created by {} ({})",
        id,
        user.user_id,
        advertisement.position.code()
    );
    Ok((StatusCode::CREATED, Json(advertisement)))
}

pub async fn update_player_advertisement(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateAdvertisementRequest>,
) -> ApiResult<Json<PlayerAdvertisement>> {
    let pool = require_pool(pool)?;
    let existing = db::get_player_advertisement(&pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Player advertisement not found"))?;
    if !user.can_manage(existing.player_id) {
        tracing::warn!("User {} tried to edit player advertisement {}", user.user_id, id);
        return Err(BackendError::forbidden("Only the owner can edit this advertisement"));
    }

    request.validate(Utc::now())?;
    db::update_player_advertisement(&pool, id, &request).await?;

    let updated = db::get_player_advertisement(&pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Player advertisement not found"))?;
    Ok(Json(updated))
}

pub async fn delete_player_advertisement(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<StatusCode> {
    let pool = require_pool(pool)?;
    let existing = db::get_player_advertisement(&pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Player advertisement not found"))?;
    if !user.can_manage(existing.player_id) {
        tracing::warn!("User {} tried to delete player advertisement {}", user.user_id, id);
        return Err(BackendError::forbidden("Only the owner can delete this advertisement"));
    }

    db::delete_player_advertisement(&pool, id).await?;
    tracing::info!("Player advertisement {} deleted by {}", id, user.user_id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn my_player_advertisements(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    ApiQuery(query): ApiQuery<AdvertisementQuery>,
) -> ApiResult<Json<Page<PlayerAdvertisement>>> {
    let pool = require_pool(pool)?;
    let filters = db::ListFilters::from_query(&query, Some(user.user_id), Utc::now())?;
    Ok(Json(db::list_player_advertisements(&pool, &query, &filters).await?))
}

pub async fn list_club_advertisements(
    State(pool): State<Option<PgPool>>,
    ApiQuery(query): ApiQuery<AdvertisementQuery>,
) -> ApiResult<Json<Page<ClubAdvertisement>>> {
    let pool = require_pool(pool)?;
    let filters = db::ListFilters::from_query(&query, None, Utc::now())?;
    Ok(Json(db::list_club_advertisements(&pool, &query, &filters).await?))
}

pub async fn get_club_advertisement(
    State(pool): State<Option<PgPool>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<ClubAdvertisement>> {
    let pool = require_pool(pool)?;
    let advertisement = db::get_club_advertisement(&pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Club advertisement not found"))?;
    Ok(Json(advertisement))
}

pub async fn create_club_advertisement(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreateClubAdvertisementRequest>,
) -> ApiResult<(StatusCode, Json<ClubAdvertisement>)> {
    let pool = require_pool(pool)?;
    let end_date = request.validate(Utc::now())?;

    let id = db::create_club_advertisement(&pool, user.user_id, &request, end_date).await?;
    let advertisement = db::get_club_advertisement(&pool, id)
        .await?
        .ok_or_else(|| BackendError::state("Created advertisement not readable"))?;

    tracing::info!(
        "Club advertisement {} created by {} for {}",
        id,
        user.user_id,
        advertisement.club_name
    );
    Ok((StatusCode::CREATED, Json(advertisement)))
}

pub async fn update_club_advertisement(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateAdvertisementRequest>,
) -> ApiResult<Json<ClubAdvertisement>> {
    let pool = require_pool(pool)?;
    let existing = db::get_club_advertisement(&pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Club advertisement not found"))?;
    if !user.can_manage(existing.club_member_id) {
        tracing::warn!("User {} tried to edit club advertisement {}", user.user_id, id);
        return Err(BackendError::forbidden("Only the owner can edit this advertisement"));
    }

    request.validate(Utc::now())?;
    db::update_club_advertisement(&pool, id, &request).await?;

    let updated = db::get_club_advertisement(&pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Club advertisement not found"))?;
    Ok(Json(updated))
}

pub async fn delete_club_advertisement(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<StatusCode> {
    let pool = require_pool(pool)?;
    let existing = db::get_club_advertisement(&pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Club advertisement not found"))?;
    if !user.can_manage(existing.club_member_id) {
        tracing::warn!("User {} tried to delete club advertisement {}", user.user_id, id);
        return Err(BackendError::forbidden("Only the owner can delete this advertisement"));
    }

    db::delete_club_advertisement(&pool, id).await?;
    tracing::info!("Club advertisement {} deleted by {}", id, user.user_id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn my_club_advertisements(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    ApiQuery(query): ApiQuery<AdvertisementQuery>,
) -> ApiResult<Json<Page<ClubAdvertisement>>> {
    let pool = require_pool(pool)?;
    let filters = db::ListFilters::from_query(&query, Some(user.user_id), Utc::now())?;
    Ok(Json(db::list_club_advertisements(&pool, &query, &filters).await?))
}

/// `GET /api/positions`
pub async fn list_positions() -> Json<Vec<PositionInfo>> {
    Json(Position::ALL.into_iter().map(PositionInfo::from).collect())
}

/// `GET /api/preferred-feet`
pub async fn list_preferred_feet() -> Json<Vec<PreferredFoot>> {
    Json(PreferredFoot::ALL.to_vec())
}
