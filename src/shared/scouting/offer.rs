//! Offer Data Structures
//!
//! A player offer is a club member's response to a player advertisement; a
//! club offer is a player's response to a club advertisement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::scouting::advertisement::{optional_text, require_text, Position};

/// Status of an offer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OfferStatus {
    /// Waiting for the advertisement owner
    #[default]
    Offered,
    Accepted,
    Rejected,
}

impl OfferStatus {
    pub const ALL: [OfferStatus; 3] = [OfferStatus::Offered, OfferStatus::Accepted, OfferStatus::Rejected];

    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Offered => "offered",
            OfferStatus::Accepted => "accepted",
            OfferStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "offered" => Some(OfferStatus::Offered),
            "accepted" => Some(OfferStatus::Accepted),
            "rejected" => Some(OfferStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        *self == OfferStatus::Offered
    }

    /// Decisions are final: only a pending offer can be accepted or rejected
    pub fn transition(self, to: OfferStatus) -> Result<OfferStatus, SharedError> {
        match (self, to) {
            (OfferStatus::Offered, OfferStatus::Accepted | OfferStatus::Rejected) => Ok(to),
            _ => Err(SharedError::invalid_transition(self.as_str(), to.as_str())),
        }
    }
}

/// Offer made by a club member on a player advertisement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerOffer {
    pub id: Uuid,
    pub player_advertisement_id: Uuid,
    pub player_id: Uuid,
    pub club_member_id: Uuid,
    pub club_member_name: String,
    pub club_name: String,
    pub league: String,
    pub region: String,
    pub position: Position,
    pub salary: f64,
    pub additional_information: Option<String>,
    pub status: OfferStatus,
    pub created_at: DateTime<Utc>,
}

/// Offer made by a player on a club advertisement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClubOffer {
    pub id: Uuid,
    pub club_advertisement_id: Uuid,
    pub club_member_id: Uuid,
    pub club_name: String,
    pub player_id: Uuid,
    pub player_name: String,
    pub position: Position,
    pub salary: f64,
    pub additional_information: Option<String>,
    pub status: OfferStatus,
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /api/player-offers`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlayerOfferRequest {
    pub player_advertisement_id: Uuid,
    pub club_name: String,
    pub league: String,
    pub region: String,
    pub salary: f64,
    #[serde(default)]
    pub additional_information: Option<String>,
}

impl CreatePlayerOfferRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require_text("club_name", &self.club_name, 100)?;
        require_text("league", &self.league, 100)?;
        require_text("region", &self.region, 100)?;
        validate_salary(self.salary)?;
        optional_text("additional_information", self.additional_information.as_deref(), 2000)
    }
}

/// Request body for `POST /api/club-offers`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClubOfferRequest {
    pub club_advertisement_id: Uuid,
    pub salary: f64,
    #[serde(default)]
    pub additional_information: Option<String>,
}

impl CreateClubOfferRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_salary(self.salary)?;
        optional_text("additional_information", self.additional_information.as_deref(), 2000)
    }
}

/// Lookup entry returned by `GET /api/offer-statuses`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OfferStatusInfo {
    pub value: OfferStatus,
    pub label: String,
}

impl From<OfferStatus> for OfferStatusInfo {
    fn from(value: OfferStatus) -> Self {
        let label = match value {
            OfferStatus::Offered => "Offered",
            OfferStatus::Accepted => "Accepted",
            OfferStatus::Rejected => "Rejected",
        };
        Self {
            value,
            label: label.to_string(),
        }
    }
}

fn validate_salary(salary: f64) -> Result<(), SharedError> {
    if !salary.is_finite() || salary < 0.0 {
        return Err(SharedError::validation("salary", "Salary must be a non-negative number"));
    }
    Ok(())
}
