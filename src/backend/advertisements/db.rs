/**
 * Advertisement Database Operations
 *
 * Rows are read with the author's name joined in from `users`. Listing
 * queries are assembled with `QueryBuilder` so that only the filters the
 * caller supplied end up in the WHERE clause.
 */

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::scouting::advertisement::is_active;
use crate::shared::scouting::{
    AdvertisementQuery, ClubAdvertisement, CreateClubAdvertisementRequest,
    CreatePlayerAdvertisementRequest, Page, PlayerAdvertisement, Position, PreferredFoot,
    SalaryRange, UpdateAdvertisementRequest,
};

pub(crate) const PLAYER_SELECT: &str = "SELECT a.id, a.player_id, \
     u.first_name || ' ' || u.last_name AS player_name, \
     a.position, a.league, a.region, a.age, a.height, a.preferred_foot, \
     a.salary_min, a.salary_max, a.description, a.created_at, a.end_date \
     FROM player_advertisements a JOIN users u ON u.id = a.player_id";

pub(crate) const CLUB_SELECT: &str = "SELECT a.id, a.club_member_id, \
     u.first_name || ' ' || u.last_name AS club_member_name, \
     a.club_name, a.position, a.league, a.region, \
     a.salary_min, a.salary_max, a.description, a.created_at, a.end_date \
     FROM club_advertisements a JOIN users u ON u.id = a.club_member_id";

#[derive(Debug, sqlx::FromRow)]
pub struct PlayerAdvertisementRow {
    pub id: Uuid,
    pub player_id: Uuid,
    pub player_name: String,
    pub position: String,
    pub league: String,
    pub region: String,
    pub age: i32,
    pub height: i32,
    pub preferred_foot: String,
    pub salary_min: f64,
    pub salary_max: f64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl PlayerAdvertisementRow {
    pub fn into_advertisement(self, now: DateTime<Utc>) -> Result<PlayerAdvertisement, BackendError> {
        Ok(PlayerAdvertisement {
            id: self.id,
            player_id: self.player_id,
            player_name: self.player_name,
            position: parse_position(&self.position)?,
            league: self.league,
            region: self.region,
            age: self.age,
            height: self.height,
            preferred_foot: PreferredFoot::from_str(&self.preferred_foot).ok_or_else(|| {
                BackendError::state(format!("Unknown preferred foot '{}'", self.preferred_foot))
            })?,
            salary_range: SalaryRange {
                min: self.salary_min,
                max: self.salary_max,
            },
            description: self.description,
            created_at: self.created_at,
            end_date: self.end_date,
            is_active: is_active(self.end_date, now),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct ClubAdvertisementRow {
    pub id: Uuid,
    pub club_member_id: Uuid,
    pub club_member_name: String,
    pub club_name: String,
    pub position: String,
    pub league: String,
    pub region: String,
    pub salary_min: f64,
    pub salary_max: f64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl ClubAdvertisementRow {
    pub fn into_advertisement(self, now: DateTime<Utc>) -> Result<ClubAdvertisement, BackendError> {
        Ok(ClubAdvertisement {
            id: self.id,
            club_member_id: self.club_member_id,
            club_member_name: self.club_member_name,
            club_name: self.club_name,
            position: parse_position(&self.position)?,
            league: self.league,
            region: self.region,
            salary_range: SalaryRange {
                min: self.salary_min,
                max: self.salary_max,
            },
            description: self.description,
            created_at: self.created_at,
            end_date: self.end_date,
            is_active: is_active(self.end_date, now),
        })
    }
}

pub(crate) fn parse_position(raw: &str) -> Result<Position, BackendError> {
    Position::from_str(raw).ok_or_else(|| BackendError::state(format!("Unknown position '{}'", raw)))
}

/// Filters shared by both advertisement kinds
#[derive(Debug, Clone)]
pub struct ListFilters {
    pub search: Option<String>,
    pub position: Option<Position>,
    pub league: Option<String>,
    pub region: Option<String>,
    pub active: Option<bool>,
    pub owner: Option<Uuid>,
    pub now: DateTime<Utc>,
}

impl ListFilters {
    pub fn from_query(
        query: &AdvertisementQuery,
        owner: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<Self, BackendError> {
        let trimmed = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        Ok(Self {
            search: query.search_pattern(),
            position: query.position()?,
            league: trimmed(&query.league),
            region: trimmed(&query.region),
            active: query.active,
            owner,
            now,
        })
    }

    fn push_where(
        &self,
        qb: &mut QueryBuilder<'_, Postgres>,
        owner_column: &str,
        search_columns: &[&str],
    ) {
        qb.push(" WHERE TRUE");

        if let Some(owner) = self.owner {
            qb.push(format!(" AND a.{} = ", owner_column)).push_bind(owner);
        }
        if let Some(position) = self.position {
            qb.push(" AND a.position = ").push_bind(position.as_str());
        }
        if let Some(league) = &self.league {
            qb.push(" AND LOWER(a.league) = LOWER(").push_bind(league.clone()).push(")");
        }
        if let Some(region) = &self.region {
            qb.push(" AND LOWER(a.region) = LOWER(").push_bind(region.clone()).push(")");
        }
        match self.active {
            Some(true) => {
                qb.push(" AND a.end_date > ").push_bind(self.now);
            }
            Some(false) => {
                qb.push(" AND a.end_date <= ").push_bind(self.now);
            }
            None => {}
        }
        if let Some(pattern) = &self.search {
            qb.push(" AND (");
            for (i, column) in search_columns.iter().enumerate() {
                if i > 0 {
                    qb.push(" OR ");
                }
                qb.push(format!("{} ILIKE ", column)).push_bind(pattern.clone());
            }
            qb.push(")");
        }
    }
}

const PLAYER_SEARCH_COLUMNS: [&str; 5] = [
    "a.league",
    "a.region",
    "a.description",
    "(u.first_name || ' ' || u.last_name)",
    "u.username",
];

const CLUB_SEARCH_COLUMNS: [&str; 4] = ["a.club_name", "a.league", "a.region", "a.description"];

/// Page of player advertisements
pub async fn list_player_advertisements(
    pool: &PgPool,
    query: &AdvertisementQuery,
    filters: &ListFilters,
) -> Result<Page<PlayerAdvertisement>, BackendError> {
    let mut count = QueryBuilder::<Postgres>::new(
        "SELECT COUNT(*) FROM player_advertisements a JOIN users u ON u.id = a.player_id",
    );
    filters.push_where(&mut count, "player_id", &PLAYER_SEARCH_COLUMNS);
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    let mut select = QueryBuilder::<Postgres>::new(PLAYER_SELECT);
    filters.push_where(&mut select, "player_id", &PLAYER_SEARCH_COLUMNS);
    select
        .push(format!(" ORDER BY {}", query.sort.order_by()))
        .push(" LIMIT ")
        .push_bind(query.page_size() as i64)
        .push(" OFFSET ")
        .push_bind(query.offset());

    let rows: Vec<PlayerAdvertisementRow> = select.build_query_as().fetch_all(pool).await?;
    let items = rows
        .into_iter()
        .map(|row| row.into_advertisement(filters.now))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Page {
        items,
        total,
        page: query.page(),
        page_size: query.page_size(),
    })
}

/// Page of club advertisements
pub async fn list_club_advertisements(
    pool: &PgPool,
    query: &AdvertisementQuery,
    filters: &ListFilters,
) -> Result<Page<ClubAdvertisement>, BackendError> {
    let mut count = QueryBuilder::<Postgres>::new(
        "SELECT COUNT(*) FROM club_advertisements a JOIN users u ON u.id = a.club_member_id",
    );
    filters.push_where(&mut count, "club_member_id", &CLUB_SEARCH_COLUMNS);
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    let mut select = QueryBuilder::<Postgres>::new(CLUB_SELECT);
    filters.push_where(&mut select, "club_member_id", &CLUB_SEARCH_COLUMNS);
    select
        .push(format!(" ORDER BY {}", query.sort.order_by()))
        .push(" LIMIT ")
        .push_bind(query.page_size() as i64)
        .push(" OFFSET ")
        .push_bind(query.offset());

    let rows: Vec<ClubAdvertisementRow> = select.build_query_as().fetch_all(pool).await?;
    let items = rows
        .into_iter()
        .map(|row| row.into_advertisement(filters.now))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Page {
        items,
        total,
        page: query.page(),
        page_size: query.page_size(),
    })
}

pub async fn get_player_advertisement(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<PlayerAdvertisement>, BackendError> {
    let sql = format!("{} WHERE a.id = $1", PLAYER_SELECT);
    let row = sqlx::query_as::<_, PlayerAdvertisementRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(|row| row.into_advertisement(Utc::now())).transpose()
}

pub async fn get_club_advertisement(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<ClubAdvertisement>, BackendError> {
    let sql = format!("{} WHERE a.id = $1", CLUB_SELECT);
    let row = sqlx::query_as::<_, ClubAdvertisementRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(|row| row.into_advertisement(Utc::now())).transpose()
}

/// Insert a player advertisement owned by `player_id`
pub async fn create_player_advertisement(
    pool: &PgPool,
    player_id: Uuid,
    request: &CreatePlayerAdvertisementRequest,
    end_date: DateTime<Utc>,
) -> Result<Uuid, BackendError> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO player_advertisements
            (id, player_id, position, league, region, age, height, preferred_foot,
             salary_min, salary_max, description, created_at, end_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        "#,
    )
    .bind(id)
    .bind(player_id)
    .bind(request.position.as_str())
    .bind(request.league.trim())
    .bind(request.region.trim())
    .bind(request.age)
    .bind(request.height)
    .bind(request.preferred_foot.as_str())
    .bind(request.salary_range.min)
    .bind(request.salary_range.max)
    .bind(&request.description)
    .bind(Utc::now())
    .bind(end_date)
    .execute(pool)
    .await?;
    Ok(id)
}

/// Insert a club advertisement owned by `club_member_id`
pub async fn create_club_advertisement(
    pool: &PgPool,
    club_member_id: Uuid,
    request: &CreateClubAdvertisementRequest,
    end_date: DateTime<Utc>,
) -> Result<Uuid, BackendError> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO club_advertisements
            (id, club_member_id, club_name, position, league, region,
             salary_min, salary_max, description, created_at, end_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#,
    )
    .bind(id)
    .bind(club_member_id)
    .bind(request.club_name.trim())
    .bind(request.position.as_str())
    .bind(request.league.trim())
    .bind(request.region.trim())
    .bind(request.salary_range.min)
    .bind(request.salary_range.max)
    .bind(&request.description)
    .bind(Utc::now())
    .bind(end_date)
    .execute(pool)
    .await?;
    Ok(id)
}

/// Apply an update to either table; `table` is one of the two fixed names
async fn update_advertisement(
    pool: &PgPool,
    table: &'static str,
    id: Uuid,
    request: &UpdateAdvertisementRequest,
) -> Result<bool, BackendError> {
    let sql = format!(
        r#"
        UPDATE {}
        SET salary_min = COALESCE($1, salary_min),
            salary_max = COALESCE($2, salary_max),
            description = CASE WHEN $3 THEN $4 ELSE description END,
            end_date = COALESCE($5, end_date)
        WHERE id = $6
        "#,
        table
    );
    let description = request.description_change();
    let result = sqlx::query(&sql)
        .bind(request.salary_range.as_ref().map(|r| r.min))
        .bind(request.salary_range.as_ref().map(|r| r.max))
        .bind(description.is_some())
        .bind(description.flatten())
        .bind(request.end_date)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn update_player_advertisement(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateAdvertisementRequest,
) -> Result<bool, BackendError> {
    update_advertisement(pool, "player_advertisements", id, request).await
}

pub async fn update_club_advertisement(
    pool: &PgPool,
    id: Uuid,
    request: &UpdateAdvertisementRequest,
) -> Result<bool, BackendError> {
    update_advertisement(pool, "club_advertisements", id, request).await
}

pub async fn delete_player_advertisement(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM player_advertisements WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_club_advertisement(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM club_advertisements WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Every player advertisement, newest first (CSV export)
pub async fn all_player_advertisements(pool: &PgPool) -> Result<Vec<PlayerAdvertisement>, BackendError> {
    let sql = format!("{} ORDER BY a.created_at DESC", PLAYER_SELECT);
    let rows = sqlx::query_as::<_, PlayerAdvertisementRow>(&sql)
        .fetch_all(pool)
        .await?;
    let now = Utc::now();
    rows.into_iter().map(|row| row.into_advertisement(now)).collect()
}

/// Every club advertisement, newest first (CSV export)
pub async fn all_club_advertisements(pool: &PgPool) -> Result<Vec<ClubAdvertisement>, BackendError> {
    let sql = format!("{} ORDER BY a.created_at DESC", CLUB_SELECT);
    let rows = sqlx::query_as::<_, ClubAdvertisementRow>(&sql)
        .fetch_all(pool)
        .await?;
    let now = Utc::now();
    rows.into_iter().map(|row| row.into_advertisement(now)).collect()
}

/// Number of advertisements of both kinds that are still running
pub async fn count_active(pool: &PgPool, now: DateTime<Utc>) -> Result<(i64, i64), sqlx::Error> {
    let players: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM player_advertisements WHERE end_date > $1")
            .bind(now)
            .fetch_one(pool)
            .await?;
    let clubs: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM club_advertisements WHERE end_date > $1")
            .bind(now)
            .fetch_one(pool)
            .await?;
    Ok((players, clubs))
}
