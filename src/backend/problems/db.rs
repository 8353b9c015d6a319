//! Problem (support ticket) database operations

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::shared::scouting::{CreateProblemRequest, Problem};

const PROBLEM_SELECT: &str = "SELECT p.id, p.title, p.description, p.is_solved, p.requester_id, \
     u.first_name || ' ' || u.last_name AS requester_name, p.created_at \
     FROM problems p JOIN users u ON u.id = p.requester_id";

#[derive(Debug, sqlx::FromRow)]
pub struct ProblemRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub is_solved: bool,
    pub requester_id: Uuid,
    pub requester_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<ProblemRow> for Problem {
    fn from(row: ProblemRow) -> Self {
        Problem {
            id: row.id,
            title: row.title,
            description: row.description,
            is_solved: row.is_solved,
            requester_id: row.requester_id,
            requester_name: row.requester_name,
            created_at: row.created_at,
        }
    }
}

pub async fn create_problem(
    pool: &PgPool,
    requester_id: Uuid,
    request: &CreateProblemRequest,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO problems (id, title, description, is_solved, requester_id, created_at)
        VALUES ($1, $2, $3, FALSE, $4, $5)
        "#,
    )
    .bind(id)
    .bind(request.title.trim())
    .bind(request.description.trim())
    .bind(requester_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(id)
}

pub async fn get_problem(pool: &PgPool, id: Uuid) -> Result<Option<Problem>, sqlx::Error> {
    let sql = format!("{} WHERE p.id = $1", PROBLEM_SELECT);
    let row = sqlx::query_as::<_, ProblemRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Problem::from))
}

/// All problems, newest first, optionally only solved or only unsolved ones
pub async fn list_problems(pool: &PgPool, solved: Option<bool>) -> Result<Vec<Problem>, sqlx::Error> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(PROBLEM_SELECT);
    if let Some(solved) = solved {
        qb.push(" WHERE p.is_solved = ").push_bind(solved);
    }
    qb.push(" ORDER BY p.created_at DESC");

    let rows = qb.build_query_as::<ProblemRow>().fetch_all(pool).await?;
    Ok(rows.into_iter().map(Problem::from).collect())
}

pub async fn problems_by_requester(pool: &PgPool, requester_id: Uuid) -> Result<Vec<Problem>, sqlx::Error> {
    let sql = format!("{} WHERE p.requester_id = $1 ORDER BY p.created_at DESC", PROBLEM_SELECT);
    let rows = sqlx::query_as::<_, ProblemRow>(&sql)
        .bind(requester_id)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Problem::from).collect())
}

pub async fn count_unsolved(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM problems WHERE is_solved = FALSE")
        .fetch_one(pool)
        .await
}

/// Returns false when no such problem exists
pub async fn mark_solved(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE problems SET is_solved = TRUE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
