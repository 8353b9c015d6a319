//! Problem (support ticket) Data Structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::scouting::advertisement::require_text;

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// A user-submitted support ticket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Problem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub is_solved: bool,
    pub requester_id: Uuid,
    pub requester_name: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/problems`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProblemRequest {
    pub title: String,
    pub description: String,
}

impl CreateProblemRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_text("title", &self.title, MAX_TITLE_LEN)?;
        require_text("description", &self.description, MAX_DESCRIPTION_LEN)
    }
}

/// Query string for `GET /api/problems`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProblemQuery {
    pub solved: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnsolvedCountResponse {
    pub count: i64,
}
