/**
 * Favorite Database Operations
 *
 * A favorite is a join row between a user and an advertisement. The
 * primary key on (user, advertisement) keeps a bookmark unique.
 */

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::advertisements::db::{
    ClubAdvertisementRow, PlayerAdvertisementRow, CLUB_SELECT, PLAYER_SELECT,
};
use crate::backend::error::BackendError;
use crate::shared::scouting::{AdvertisementKind, ClubAdvertisement, PlayerAdvertisement};

/// Join table and advertisement column for each kind
fn favorite_table(kind: AdvertisementKind) -> (&'static str, &'static str) {
    match kind {
        AdvertisementKind::Player => ("favorite_player_advertisements", "player_advertisement_id"),
        AdvertisementKind::Club => ("favorite_club_advertisements", "club_advertisement_id"),
    }
}

/// Add a favorite; adding one that already exists changes nothing
///
/// Returns whether a new row was written.
pub async fn add_favorite(
    pool: &PgPool,
    user_id: Uuid,
    kind: AdvertisementKind,
    advertisement_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let (table, column) = favorite_table(kind);
    let sql = format!(
        "INSERT INTO {} (user_id, {}, created_at) VALUES ($1, $2, $3) ON CONFLICT DO NOTHING",
        table, column
    );
    let result = sqlx::query(&sql)
        .bind(user_id)
        .bind(advertisement_id)
        .bind(Utc::now())
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn remove_favorite(
    pool: &PgPool,
    user_id: Uuid,
    kind: AdvertisementKind,
    advertisement_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let (table, column) = favorite_table(kind);
    let sql = format!("DELETE FROM {} WHERE user_id = $1 AND {} = $2", table, column);
    let result = sqlx::query(&sql)
        .bind(user_id)
        .bind(advertisement_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn favorite_exists(
    pool: &PgPool,
    user_id: Uuid,
    kind: AdvertisementKind,
    advertisement_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let (table, column) = favorite_table(kind);
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE user_id = $1 AND {} = $2)",
        table, column
    );
    sqlx::query_scalar(&sql)
        .bind(user_id)
        .bind(advertisement_id)
        .fetch_one(pool)
        .await
}

/// The caller's favorited player advertisements, most recently added first
pub async fn favorite_player_advertisements(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<PlayerAdvertisement>, BackendError> {
    let sql = format!(
        "{} JOIN favorite_player_advertisements f ON f.player_advertisement_id = a.id \
         WHERE f.user_id = $1 ORDER BY f.created_at DESC",
        PLAYER_SELECT
    );
    let rows = sqlx::query_as::<_, PlayerAdvertisementRow>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    let now = Utc::now();
    rows.into_iter().map(|row| row.into_advertisement(now)).collect()
}

/// The caller's favorited club advertisements, most recently added first
pub async fn favorite_club_advertisements(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<ClubAdvertisement>, BackendError> {
    let sql = format!(
        "{} JOIN favorite_club_advertisements f ON f.club_advertisement_id = a.id \
         WHERE f.user_id = $1 ORDER BY f.created_at DESC",
        CLUB_SELECT
    );
    let rows = sqlx::query_as::<_, ClubAdvertisementRow>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    let now = Utc::now();
    rows.into_iter().map(|row| row.into_advertisement(now)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorite_tables() {
        assert_eq!(
            favorite_table(AdvertisementKind::Player),
            ("favorite_player_advertisements", "player_advertisement_id")
        );
        assert_eq!(
            favorite_table(AdvertisementKind::Club),
            ("favorite_club_advertisements", "club_advertisement_id")
        );
    }
}
