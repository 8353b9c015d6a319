/**
 * Offer Database Operations
 *
 * Offers are read joined with their advertisement so both parties are
 * known: for a player offer the advertisement owner is the player, for a
 * club offer it is the club member.
 *
 * Status changes only ever touch rows that are still `offered`, so two
 * concurrent decisions cannot both succeed.
 */

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::advertisements::db::parse_position;
use crate::backend::error::BackendError;
use crate::shared::scouting::{
    ClubOffer, CreateClubOfferRequest, CreatePlayerOfferRequest, OfferStatus, PlayerOffer,
    Position,
};

const PLAYER_OFFER_SELECT: &str = "SELECT o.id, o.player_advertisement_id, a.player_id, \
     o.club_member_id, u.first_name || ' ' || u.last_name AS club_member_name, \
     o.club_name, o.league, o.region, o.position, o.salary, o.additional_information, \
     o.status, o.created_at \
     FROM player_offers o \
     JOIN player_advertisements a ON a.id = o.player_advertisement_id \
     JOIN users u ON u.id = o.club_member_id";

const CLUB_OFFER_SELECT: &str = "SELECT o.id, o.club_advertisement_id, a.club_member_id, \
     a.club_name, o.player_id, u.first_name || ' ' || u.last_name AS player_name, \
     o.position, o.salary, o.additional_information, o.status, o.created_at \
     FROM club_offers o \
     JOIN club_advertisements a ON a.id = o.club_advertisement_id \
     JOIN users u ON u.id = o.player_id";

#[derive(Debug, sqlx::FromRow)]
pub struct PlayerOfferRow {
    pub id: Uuid,
    pub player_advertisement_id: Uuid,
    pub player_id: Uuid,
    pub club_member_id: Uuid,
    pub club_member_name: String,
    pub club_name: String,
    pub league: String,
    pub region: String,
    pub position: String,
    pub salary: f64,
    pub additional_information: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<PlayerOfferRow> for PlayerOffer {
    type Error = BackendError;

    fn try_from(row: PlayerOfferRow) -> Result<Self, Self::Error> {
        Ok(PlayerOffer {
            id: row.id,
            player_advertisement_id: row.player_advertisement_id,
            player_id: row.player_id,
            club_member_id: row.club_member_id,
            club_member_name: row.club_member_name,
            club_name: row.club_name,
            league: row.league,
            region: row.region,
            position: parse_position(&row.position)?,
            salary: row.salary,
            additional_information: row.additional_information,
            status: parse_status(&row.status)?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct ClubOfferRow {
    pub id: Uuid,
    pub club_advertisement_id: Uuid,
    pub club_member_id: Uuid,
    pub club_name: String,
    pub player_id: Uuid,
    pub player_name: String,
    pub position: String,
    pub salary: f64,
    pub additional_information: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ClubOfferRow> for ClubOffer {
    type Error = BackendError;

    fn try_from(row: ClubOfferRow) -> Result<Self, Self::Error> {
        Ok(ClubOffer {
            id: row.id,
            club_advertisement_id: row.club_advertisement_id,
            club_member_id: row.club_member_id,
            club_name: row.club_name,
            player_id: row.player_id,
            player_name: row.player_name,
            position: parse_position(&row.position)?,
            salary: row.salary,
            additional_information: row.additional_information,
            status: parse_status(&row.status)?,
            created_at: row.created_at,
        })
    }
}

fn parse_status(raw: &str) -> Result<OfferStatus, BackendError> {
    OfferStatus::from_str(raw).ok_or_else(|| BackendError::state(format!("Unknown offer status '{}'", raw)))
}

fn convert<R, T>(rows: Vec<R>) -> Result<Vec<T>, BackendError>
where
    T: TryFrom<R, Error = BackendError>,
{
    rows.into_iter().map(T::try_from).collect()
}

// Player offers

pub async fn create_player_offer(
    pool: &PgPool,
    club_member_id: Uuid,
    request: &CreatePlayerOfferRequest,
    position: Position,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO player_offers
            (id, player_advertisement_id, club_member_id, club_name, league, region,
             position, salary, additional_information, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#,
    )
    .bind(id)
    .bind(request.player_advertisement_id)
    .bind(club_member_id)
    .bind(request.club_name.trim())
    .bind(request.league.trim())
    .bind(request.region.trim())
    .bind(position.as_str())
    .bind(request.salary)
    .bind(&request.additional_information)
    .bind(OfferStatus::Offered.as_str())
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(id)
}

pub async fn get_player_offer(pool: &PgPool, id: Uuid) -> Result<Option<PlayerOffer>, BackendError> {
    let sql = format!("{} WHERE o.id = $1", PLAYER_OFFER_SELECT);
    let row = sqlx::query_as::<_, PlayerOfferRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(PlayerOffer::try_from).transpose()
}

/// Offers on advertisements owned by `player_id`
pub async fn received_player_offers(pool: &PgPool, player_id: Uuid) -> Result<Vec<PlayerOffer>, BackendError> {
    let sql = format!("{} WHERE a.player_id = $1 ORDER BY o.created_at DESC", PLAYER_OFFER_SELECT);
    let rows = sqlx::query_as::<_, PlayerOfferRow>(&sql)
        .bind(player_id)
        .fetch_all(pool)
        .await?;
    convert(rows)
}

/// Offers made by `club_member_id`
pub async fn sent_player_offers(pool: &PgPool, club_member_id: Uuid) -> Result<Vec<PlayerOffer>, BackendError> {
    let sql = format!("{} WHERE o.club_member_id = $1 ORDER BY o.created_at DESC", PLAYER_OFFER_SELECT);
    let rows = sqlx::query_as::<_, PlayerOfferRow>(&sql)
        .bind(club_member_id)
        .fetch_all(pool)
        .await?;
    convert(rows)
}

pub async fn has_pending_player_offer(
    pool: &PgPool,
    advertisement_id: Uuid,
    club_member_id: Uuid,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM player_offers \
         WHERE player_advertisement_id = $1 AND club_member_id = $2 AND status = 'offered')",
    )
    .bind(advertisement_id)
    .bind(club_member_id)
    .fetch_one(pool)
    .await
}

/// Decide a pending offer. Returns false when it was no longer pending.
pub async fn set_player_offer_status(
    pool: &PgPool,
    id: Uuid,
    status: OfferStatus,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE player_offers SET status = $1 WHERE id = $2 AND status = 'offered'")
        .bind(status.as_str())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn withdraw_player_offer(pool: &PgPool, id: Uuid, club_member_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM player_offers WHERE id = $1 AND club_member_id = $2 AND status = 'offered'",
    )
    .bind(id)
    .bind(club_member_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

// Club offers

pub async fn create_club_offer(
    pool: &PgPool,
    player_id: Uuid,
    request: &CreateClubOfferRequest,
    position: Position,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO club_offers
            (id, club_advertisement_id, player_id, position, salary,
             additional_information, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(id)
    .bind(request.club_advertisement_id)
    .bind(player_id)
    .bind(position.as_str())
    .bind(request.salary)
    .bind(&request.additional_information)
    .bind(OfferStatus::Offered.as_str())
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(id)
}

pub async fn get_club_offer(pool: &PgPool, id: Uuid) -> Result<Option<ClubOffer>, BackendError> {
    let sql = format!("{} WHERE o.id = $1", CLUB_OFFER_SELECT);
    let row = sqlx::query_as::<_, ClubOfferRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(ClubOffer::try_from).transpose()
}

/// Offers on advertisements owned by `club_member_id`
pub async fn received_club_offers(pool: &PgPool, club_member_id: Uuid) -> Result<Vec<ClubOffer>, BackendError> {
    let sql = format!("{} WHERE a.club_member_id = $1 ORDER BY o.created_at DESC", CLUB_OFFER_SELECT);
    let rows = sqlx::query_as::<_, ClubOfferRow>(&sql)
        .bind(club_member_id)
        .fetch_all(pool)
        .await?;
    convert(rows)
}

/// Offers made by `player_id`
pub async fn sent_club_offers(pool: &PgPool, player_id: Uuid) -> Result<Vec<ClubOffer>, BackendError> {
    let sql = format!("{} WHERE o.player_id = $1 ORDER BY o.created_at DESC", CLUB_OFFER_SELECT);
    let rows = sqlx::query_as::<_, ClubOfferRow>(&sql)
        .bind(player_id)
        .fetch_all(pool)
        .await?;
    convert(rows)
}

pub async fn has_pending_club_offer(
    pool: &PgPool,
    advertisement_id: Uuid,
    player_id: Uuid,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM club_offers \
         WHERE club_advertisement_id = $1 AND player_id = $2 AND status = 'offered')",
    )
    .bind(advertisement_id)
    .bind(player_id)
    .fetch_one(pool)
    .await
}

pub async fn set_club_offer_status(
    pool: &PgPool,
    id: Uuid,
    status: OfferStatus,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE club_offers SET status = $1 WHERE id = $2 AND status = 'offered'")
        .bind(status.as_str())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn withdraw_club_offer(pool: &PgPool, id: Uuid, player_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM club_offers WHERE id = $1 AND player_id = $2 AND status = 'offered'",
    )
    .bind(id)
    .bind(player_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Pending offers of both kinds
pub async fn count_pending(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT (SELECT COUNT(*) FROM player_offers WHERE status = 'offered') \
              + (SELECT COUNT(*) FROM club_offers WHERE status = 'offered')",
    )
    .fetch_one(pool)
    .await
}
