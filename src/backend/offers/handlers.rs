/**
 * Offer Handlers
 *
 * # Routes
 *
 * - `POST   /api/player-offers`              - club member offers on a player advertisement
 * - `GET    /api/player-offers/received`     - offers on the caller's player advertisements
 * - `GET    /api/player-offers/sent`         - offers the caller made
 * - `PUT    /api/player-offers/{id}/accept`  - advertisement owner accepts
 * - `PUT    /api/player-offers/{id}/reject`  - advertisement owner rejects
 * - `DELETE /api/player-offers/{id}`         - author withdraws a pending offer
 * - the same set under `/api/club-offers`
 *
 * # Rules
 *
 * - Nobody can offer on their own advertisement (403)
 * - Expired advertisements take no new offers (400)
 * - One pending offer per advertisement and author (409)
 * - Decisions are final (409 on a second decision)
 *
 * The advertisement owner is notified over the hub when an offer arrives;
 * the author is notified when it is accepted or rejected.
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::backend::advertisements::db as ads;
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::{ApiJson, ApiPath, AuthUser};
use crate::backend::offers::db;
use crate::backend::realtime::ChatHub;
use crate::backend::server::state::AppState;
use crate::shared::event::EventType;
use crate::shared::scouting::{
    AdvertisementKind, ClubOffer, CreateClubOfferRequest, CreatePlayerOfferRequest, OfferStatus,
    OfferStatusInfo, PlayerOffer,
};
use crate::shared::RealtimeEvent;

/// Notification about an offer, carrying enough ids for the client to link it
pub fn offer_notification(
    title: &str,
    message: String,
    offer_id: Uuid,
    kind: AdvertisementKind,
    status: OfferStatus,
) -> RealtimeEvent {
    RealtimeEvent::new(
        EventType::Notification,
        serde_json::json!({
            "title": title,
            "message": message,
            "offer_id": offer_id,
            "kind": kind,
            "status": status,
        }),
    )
}

fn decision_title(status: OfferStatus) -> &'static str {
    match status {
        OfferStatus::Accepted => "Offer accepted",
        OfferStatus::Rejected => "Offer rejected",
        OfferStatus::Offered => "Offer updated",
    }
}

fn notify(hub: &ChatHub, user_id: Uuid, event: RealtimeEvent) {
    let delivered = hub.publish(user_id, event);
    tracing::debug!("Offer notification delivered to {} connections of {}", delivered, user_id);
}

// Player offers

pub async fn create_player_offer(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreatePlayerOfferRequest>,
) -> ApiResult<(StatusCode, Json<PlayerOffer>)> {
    let pool = state.pool()?;
    request.validate()?;

    let advertisement = ads::get_player_advertisement(pool, request.player_advertisement_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Player advertisement not found"))?;

    if advertisement.player_id == user.user_id {
        tracing::warn!("User {} tried to offer on their own advertisement", user.user_id);
        return Err(BackendError::forbidden("You cannot make an offer on your own advertisement"));
    }
    if !advertisement.is_active {
        return Err(BackendError::bad_request("This advertisement is no longer active"));
    }
    if db::has_pending_player_offer(pool, advertisement.id, user.user_id).await? {
        return Err(BackendError::conflict("You already have a pending offer on this advertisement"));
    }

    let id = db::create_player_offer(pool, user.user_id, &request, advertisement.position).await?;
    let offer = db::get_player_offer(pool, id)
        .await?
        .ok_or_else(|| BackendError::state("Created offer not readable"))?;

    tracing::info!("Player offer {} created on advertisement {}", id, advertisement.id);
    notify(
        &state.hub,
        advertisement.player_id,
        offer_notification(
            "New offer",
            format!(
                "{} offered {:.2} for your {} advertisement",
                offer.club_name,
                offer.salary,
                advertisement.position.label()
            ),
            offer.id,
            AdvertisementKind::Player,
            offer.status,
        ),
    );

    Ok((StatusCode::CREATED, Json(offer)))
}

pub async fn received_player_offers(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<Vec<PlayerOffer>>> {
    let pool = state.pool()?;
    Ok(Json(db::received_player_offers(pool, user.user_id).await?))
}

pub async fn sent_player_offers(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<Vec<PlayerOffer>>> {
    let pool = state.pool()?;
    Ok(Json(db::sent_player_offers(pool, user.user_id).await?))
}

async fn decide_player_offer(
    state: &AppState,
    user_id: Uuid,
    id: Uuid,
    to: OfferStatus,
) -> ApiResult<PlayerOffer> {
    let pool = state.pool()?;
    let offer = db::get_player_offer(pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Offer not found"))?;

    if offer.player_id != user_id {
        tracing::warn!("User {} tried to decide player offer {}", user_id, id);
        return Err(BackendError::forbidden("Only the advertisement owner can decide this offer"));
    }
    let status = offer.status.transition(to)?;

    if !db::set_player_offer_status(pool, id, status).await? {
        return Err(BackendError::conflict("Offer has already been decided"));
    }

    let decided = PlayerOffer { status, ..offer };
    tracing::info!("Player offer {} {}", id, status.as_str());
    notify(
        &state.hub,
        decided.club_member_id,
        offer_notification(
            decision_title(status),
            format!("Your offer for a {} was {}", decided.position.label(), status.as_str()),
            decided.id,
            AdvertisementKind::Player,
            status,
        ),
    );
    Ok(decided)
}

pub async fn accept_player_offer(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<PlayerOffer>> {
    Ok(Json(decide_player_offer(&state, user.user_id, id, OfferStatus::Accepted).await?))
}

pub async fn reject_player_offer(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<PlayerOffer>> {
    Ok(Json(decide_player_offer(&state, user.user_id, id, OfferStatus::Rejected).await?))
}

pub async fn withdraw_player_offer(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<StatusCode> {
    let pool = state.pool()?;
    let offer = db::get_player_offer(pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Offer not found"))?;

    if offer.club_member_id != user.user_id {
        return Err(BackendError::forbidden("Only the author can withdraw this offer"));
    }
    if !offer.status.is_pending() || !db::withdraw_player_offer(pool, id, user.user_id).await? {
        return Err(BackendError::conflict("Only pending offers can be withdrawn"));
    }

    tracing::info!("Player offer {} withdrawn", id);
    Ok(StatusCode::NO_CONTENT)
}

// Club offers

pub async fn create_club_offer(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreateClubOfferRequest>,
) -> ApiResult<(StatusCode, Json<ClubOffer>)> {
    let pool = state.pool()?;
    request.validate()?;

    let advertisement = ads::get_club_advertisement(pool, request.club_advertisement_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Club advertisement not found"))?;

    if advertisement.club_member_id == user.user_id {
        tracing::warn!("User {} tried to offer on their own advertisement", user.user_id);
        return Err(BackendError::forbidden("You cannot make an offer on your own advertisement"));
    }
    if !advertisement.is_active {
        return Err(BackendError::bad_request("This advertisement is no longer active"));
    }
    if db::has_pending_club_offer(pool, advertisement.id, user.user_id).await? {
        return Err(BackendError::conflict("You already have a pending offer on this advertisement"));
    }

    let id = db::create_club_offer(pool, user.user_id, &request, advertisement.position).await?;
    let offer = db::get_club_offer(pool, id)
        .await?
        .ok_or_else(|| BackendError::state("Created offer not readable"))?;

    tracing::info!("Club offer {} created on advertisement {}", id, advertisement.id);
    notify(
        &state.hub,
        advertisement.club_member_id,
        offer_notification(
            "New offer",
            format!(
                "{} applied for your {} position at {}",
                offer.player_name,
                advertisement.position.label(),
                advertisement.club_name
            ),
            offer.id,
            AdvertisementKind::Club,
            offer.status,
        ),
    );

    Ok((StatusCode::CREATED, Json(offer)))
}

pub async fn received_club_offers(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<Vec<ClubOffer>>> {
    let pool = state.pool()?;
    Ok(Json(db::received_club_offers(pool, user.user_id).await?))
}

pub async fn sent_club_offers(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<Vec<ClubOffer>>> {
    let pool = state.pool()?;
    Ok(Json(db::sent_club_offers(pool, user.user_id).await?))
}

async fn decide_club_offer(
    state: &AppState,
    user_id: Uuid,
    id: Uuid,
    to: OfferStatus,
) -> ApiResult<ClubOffer> {
    let pool = state.pool()?;
    let offer = db::get_club_offer(pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Offer not found"))?;

    if offer.club_member_id != user_id {
        tracing::warn!("User {} tried to decide club offer {}", user_id, id);
        return Err(BackendError::forbidden("Only the advertisement owner can decide this offer"));
    }
    let status = offer.status.transition(to)?;

    if !db::set_club_offer_status(pool, id, status).await? {
        return Err(BackendError::conflict("Offer has already been decided"));
    }

    let decided = ClubOffer { status, ..offer };
    tracing::info!("Club offer {} {}", id, status.as_str());
    notify(
        &state.hub,
        decided.player_id,
        offer_notification(
            decision_title(status),
            format!("{} {} your application", decided.club_name, status.as_str()),
            decided.id,
            AdvertisementKind::Club,
            status,
        ),
    );
    Ok(decided)
}

pub async fn accept_club_offer(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<ClubOffer>> {
    Ok(Json(decide_club_offer(&state, user.user_id, id, OfferStatus::Accepted).await?))
}

pub async fn reject_club_offer(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<ClubOffer>> {
    Ok(Json(decide_club_offer(&state, user.user_id, id, OfferStatus::Rejected).await?))
}

pub async fn withdraw_club_offer(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<StatusCode> {
    let pool = state.pool()?;
    let offer = db::get_club_offer(pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Offer not found"))?;

    if offer.player_id != user.user_id {
        return Err(BackendError::forbidden("Only the author can withdraw this offer"));
    }
    if !offer.status.is_pending() || !db::withdraw_club_offer(pool, id, user.user_id).await? {
        return Err(BackendError::conflict("Only pending offers can be withdrawn"));
    }

    tracing::info!("Club offer {} withdrawn", id);
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/offer-statuses`
pub async fn list_offer_statuses() -> Json<Vec<OfferStatusInfo>> {
    Json(OfferStatus::ALL.into_iter().map(OfferStatusInfo::from).collect())
}
