/**
 * CSV Export Handlers
 *
 * # Routes
 *
 * - `GET /api/admin/export/users.csv`                  - admin
 * - `GET /api/admin/export/player-advertisements.csv`  - admin
 * - `GET /api/admin/export/club-advertisements.csv`    - admin
 * - `GET /api/admin/export/problems.csv`               - admin
 * - `GET /api/users/me/export/offers.csv`              - offers the caller received
 *
 * Dates are written as RFC 3339, salaries with two decimals.
 */

use axum::extract::State;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::backend::auth::users::{self, User};
use crate::backend::error::ApiResult;
use crate::backend::export::csv::{CsvFile, CsvWriter};
use crate::backend::middleware::{AdminUser, AuthUser};
use crate::backend::server::state::require_pool;
use crate::backend::{advertisements, offers, problems};
use crate::shared::scouting::{
    ClubAdvertisement, ClubOffer, PlayerAdvertisement, PlayerOffer, Problem,
};

fn date(value: DateTime<Utc>) -> String {
    value.to_rfc3339()
}

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn users_csv(users: &[User]) -> String {
    let mut csv = CsvWriter::new(&[
        "id", "username", "email", "first_name", "last_name", "phone_number", "location",
        "role", "created_at",
    ]);
    for user in users {
        csv.row([
            user.id.to_string(),
            user.username.clone(),
            user.email.clone(),
            user.first_name.clone(),
            user.last_name.clone(),
            user.phone_number.clone().unwrap_or_default(),
            user.location.clone().unwrap_or_default(),
            user.role().as_str().to_string(),
            date(user.created_at),
        ]);
    }
    csv.finish()
}

pub fn player_advertisements_csv(ads: &[PlayerAdvertisement]) -> String {
    let mut csv = CsvWriter::new(&[
        "id", "player", "position", "league", "region", "age", "height", "preferred_foot",
        "salary_min", "salary_max", "description", "created_at", "end_date", "active",
    ]);
    for ad in ads {
        csv.row([
            ad.id.to_string(),
            ad.player_name.clone(),
            ad.position.label().to_string(),
            ad.league.clone(),
            ad.region.clone(),
            ad.age.to_string(),
            ad.height.to_string(),
            ad.preferred_foot.as_str().to_string(),
            money(ad.salary_range.min),
            money(ad.salary_range.max),
            ad.description.clone().unwrap_or_default(),
            date(ad.created_at),
            date(ad.end_date),
            ad.is_active.to_string(),
        ]);
    }
    csv.finish()
}

pub fn club_advertisements_csv(ads: &[ClubAdvertisement]) -> String {
    let mut csv = CsvWriter::new(&[
        "id", "club", "posted_by", "position", "league", "region", "salary_min", "salary_max",
        "description", "created_at", "end_date", "active",
    ]);
    for ad in ads {
        csv.row([
            ad.id.to_string(),
            ad.club_name.clone(),
            ad.club_member_name.clone(),
            ad.position.label().to_string(),
            ad.league.clone(),
            ad.region.clone(),
            money(ad.salary_range.min),
            money(ad.salary_range.max),
            ad.description.clone().unwrap_or_default(),
            date(ad.created_at),
            date(ad.end_date),
            ad.is_active.to_string(),
        ]);
    }
    csv.finish()
}

pub fn problems_csv(problems: &[Problem]) -> String {
    let mut csv = CsvWriter::new(&["id", "title", "description", "solved", "requester", "created_at"]);
    for problem in problems {
        csv.row([
            problem.id.to_string(),
            problem.title.clone(),
            problem.description.clone(),
            problem.is_solved.to_string(),
            problem.requester_name.clone(),
            date(problem.created_at),
        ]);
    }
    csv.finish()
}

/// Offers received on the caller's advertisements of both kinds
pub fn received_offers_csv(player_offers: &[PlayerOffer], club_offers: &[ClubOffer]) -> String {
    let mut csv = CsvWriter::new(&[
        "kind", "id", "advertisement_id", "from", "position", "salary", "status", "message",
        "created_at",
    ]);
    for offer in player_offers {
        csv.row([
            "player".to_string(),
            offer.id.to_string(),
            offer.player_advertisement_id.to_string(),
            offer.club_name.clone(),
            offer.position.label().to_string(),
            money(offer.salary),
            offer.status.as_str().to_string(),
            offer.additional_information.clone().unwrap_or_default(),
            date(offer.created_at),
        ]);
    }
    for offer in club_offers {
        csv.row([
            "club".to_string(),
            offer.id.to_string(),
            offer.club_advertisement_id.to_string(),
            offer.player_name.clone(),
            offer.position.label().to_string(),
            money(offer.salary),
            offer.status.as_str().to_string(),
            offer.additional_information.clone().unwrap_or_default(),
            date(offer.created_at),
        ]);
    }
    csv.finish()
}

pub async fn export_users(
    State(pool): State<Option<PgPool>>,
    AdminUser(admin): AdminUser,
) -> ApiResult<CsvFile> {
    let pool = require_pool(pool)?;
    let users = users::all_users(&pool).await?;
    tracing::info!("Admin {} exported {} users", admin.user_id, users.len());
    Ok(CsvFile::new("users.csv", users_csv(&users)))
}

pub async fn export_player_advertisements(
    State(pool): State<Option<PgPool>>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<CsvFile> {
    let pool = require_pool(pool)?;
    let ads = advertisements::db::all_player_advertisements(&pool).await?;
    Ok(CsvFile::new("player-advertisements.csv", player_advertisements_csv(&ads)))
}

pub async fn export_club_advertisements(
    State(pool): State<Option<PgPool>>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<CsvFile> {
    let pool = require_pool(pool)?;
    let ads = advertisements::db::all_club_advertisements(&pool).await?;
    Ok(CsvFile::new("club-advertisements.csv", club_advertisements_csv(&ads)))
}

pub async fn export_problems(
    State(pool): State<Option<PgPool>>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<CsvFile> {
    let pool = require_pool(pool)?;
    let problems = problems::db::list_problems(&pool, None).await?;
    Ok(CsvFile::new("problems.csv", problems_csv(&problems)))
}

pub async fn export_my_offers(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
) -> ApiResult<CsvFile> {
    let pool = require_pool(pool)?;
    let player_offers = offers::db::received_player_offers(&pool, user.user_id).await?;
    let club_offers = offers::db::received_club_offers(&pool, user.user_id).await?;
    Ok(CsvFile::new("offers.csv", received_offers_csv(&player_offers, &club_offers)))
}
