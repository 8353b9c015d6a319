/**
 * Problem Handlers
 *
 * # Routes
 *
 * - `POST /api/problems`                  - any signed-in user reports a problem
 * - `GET  /api/problems/mine`             - the caller's reports
 * - `GET  /api/problems?solved=`          - admin
 * - `GET  /api/problems/unsolved/count`   - admin
 * - `PUT  /api/problems/{id}/solve`       - admin
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::{AdminUser, ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::backend::problems::db;
use crate::backend::server::state::require_pool;
use crate::shared::scouting::{CreateProblemRequest, Problem, ProblemQuery, UnsolvedCountResponse};

pub async fn create_problem(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreateProblemRequest>,
) -> ApiResult<(StatusCode, Json<Problem>)> {
    let pool = require_pool(pool)?;
    request.validate()?;

    let id = db::create_problem(&pool, user.user_id, &request).await?;
    let problem = db::get_problem(&pool, id)
        .await?
        .ok_or_else(|| BackendError::state("Created problem not readable"))?;

    tracing::info!("Problem {} reported by {}", id, user.user_id);
    Ok((StatusCode::CREATED, Json(problem)))
}

pub async fn my_problems(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<Vec<Problem>>> {
    let pool = require_pool(pool)?;
    Ok(Json(db::problems_by_requester(&pool, user.user_id).await?))
}

pub async fn list_problems(
    State(pool): State<Option<PgPool>>,
    AdminUser(_admin): AdminUser,
    ApiQuery(query): ApiQuery<ProblemQuery>,
) -> ApiResult<Json<Vec<Problem>>> {
    let pool = require_pool(pool)?;
    Ok(Json(db::list_problems(&pool, query.solved).await?))
}

pub async fn unsolved_count(
    State(pool): State<Option<PgPool>>,
    AdminUser(_admin): AdminUser,
) -> ApiResult<Json<UnsolvedCountResponse>> {
    let pool = require_pool(pool)?;
    let count = db::count_unsolved(&pool).await?;
    Ok(Json(UnsolvedCountResponse { count }))
}

pub async fn solve_problem(
    State(pool): State<Option<PgPool>>,
    AdminUser(admin): AdminUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<Problem>> {
    let pool = require_pool(pool)?;
    if !db::mark_solved(&pool, id).await? {
        return Err(BackendError::not_found("Problem not found"));
    }

    tracing::info!("Problem {} marked solved by {}", id, admin.user_id);
    let problem = db::get_problem(&pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Problem not found"))?;
    Ok(Json(problem))
}
