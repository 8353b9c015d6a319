//! Advertisement Data Structures
//!
//! Player advertisements are posted by players looking for a club; club
//! advertisements are posted by club members looking for a player. Both
//! carry a position, a salary range, and an end date that decides whether
//! the listing is still active.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Lifetime applied when a new advertisement does not name an end date
pub const DEFAULT_LIFETIME_DAYS: i64 = 30;
/// Furthest an end date may lie in the future
pub const MAX_LIFETIME_DAYS: i64 = 365;

pub const MIN_PLAYER_AGE: i32 = 15;
pub const MAX_PLAYER_AGE: i32 = 50;
pub const MIN_PLAYER_HEIGHT_CM: i32 = 140;
pub const MAX_PLAYER_HEIGHT_CM: i32 = 220;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Playing position
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Goalkeeper,
    RightBack,
    CenterBack,
    LeftBack,
    DefensiveMidfield,
    CentralMidfield,
    AttackingMidfield,
    RightWinger,
    LeftWinger,
    Striker,
}

impl Position {
    pub const ALL: [Position; 10] = [
        Position::Goalkeeper,
        Position::RightBack,
        Position::CenterBack,
        Position::LeftBack,
        Position::DefensiveMidfield,
        Position::CentralMidfield,
        Position::AttackingMidfield,
        Position::RightWinger,
        Position::LeftWinger,
        Position::Striker,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "goalkeeper",
            Position::RightBack => "right_back",
            Position::CenterBack => "center_back",
            Position::LeftBack => "left_back",
            Position::DefensiveMidfield => "defensive_midfield",
            Position::CentralMidfield => "central_midfield",
            Position::AttackingMidfield => "attacking_midfield",
            Position::RightWinger => "right_winger",
            Position::LeftWinger => "left_winger",
            Position::Striker => "striker",
        }
    }

    /// Short code shown in listings
    pub fn code(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::RightBack => "RB",
            Position::CenterBack => "CB",
            Position::LeftBack => "LB",
            Position::DefensiveMidfield => "CDM",
            Position::CentralMidfield => "CM",
            Position::AttackingMidfield => "CAM",
            Position::RightWinger => "RW",
            Position::LeftWinger => "LW",
            Position::Striker => "ST",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::RightBack => "Right Back",
            Position::CenterBack => "Center Back",
            Position::LeftBack => "Left Back",
            Position::DefensiveMidfield => "Defensive Midfield",
            Position::CentralMidfield => "Central Midfield",
            Position::AttackingMidfield => "Attacking Midfield",
            Position::RightWinger => "Right Winger",
            Position::LeftWinger => "Left Winger",
            Position::Striker => "Striker",
        }
    }

    /// Accepts the stored name or the short code, case-insensitively
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s || p.code().eq_ignore_ascii_case(&s))
    }
}

/// Lookup entry returned by `GET /api/positions`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PositionInfo {
    pub value: Position,
    pub code: String,
    pub label: String,
}

impl From<Position> for PositionInfo {
    fn from(position: Position) -> Self {
        Self {
            value: position,
            code: position.code().to_string(),
            label: position.label().to_string(),
        }
    }
}

/// Player's stronger foot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PreferredFoot {
    Left,
    Right,
    Both,
}

impl PreferredFoot {
    pub const ALL: [PreferredFoot; 3] = [PreferredFoot::Left, PreferredFoot::Right, PreferredFoot::Both];

    pub fn as_str(&self) -> &'static str {
        match self {
            PreferredFoot::Left => "left",
            PreferredFoot::Right => "right",
            PreferredFoot::Both => "both",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "left" => Some(PreferredFoot::Left),
            "right" => Some(PreferredFoot::Right),
            "both" => Some(PreferredFoot::Both),
            _ => None,
        }
    }
}

/// Expected salary bounds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
}

impl SalaryRange {
    pub fn new(min: f64, max: f64) -> Result<Self, SharedError> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), SharedError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(SharedError::validation("salary_range", "Salary must be a number"));
        }
        if self.min < 0.0 {
            return Err(SharedError::validation("salary_range", "Minimum salary cannot be negative"));
        }
        if self.min > self.max {
            return Err(SharedError::validation(
                "salary_range",
                "Minimum salary cannot exceed maximum salary",
            ));
        }
        Ok(())
    }

    pub fn contains(&self, salary: f64) -> bool {
        salary >= self.min && salary <= self.max
    }
}

/// Listing posted by a player looking for a club
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerAdvertisement {
    pub id: Uuid,
    pub player_id: Uuid,
    pub player_name: String,
    pub position: Position,
    pub league: String,
    pub region: String,
    pub age: i32,
    pub height: i32,
    pub preferred_foot: PreferredFoot,
    pub salary_range: SalaryRange,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
}

/// Listing posted by a club member looking for a player
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClubAdvertisement {
    pub id: Uuid,
    pub club_member_id: Uuid,
    pub club_member_name: String,
    pub club_name: String,
    pub position: Position,
    pub league: String,
    pub region: String,
    pub salary_range: SalaryRange,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
}

/// An advertisement is active until its end date passes
pub fn is_active(end_date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    end_date > now
}

/// Request body for `POST /api/player-advertisements`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlayerAdvertisementRequest {
    pub position: Position,
    pub league: String,
    pub region: String,
    pub age: i32,
    pub height: i32,
    pub preferred_foot: PreferredFoot,
    pub salary_range: SalaryRange,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

impl CreatePlayerAdvertisementRequest {
    /// Validate the request and resolve the end date
    pub fn validate(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, SharedError> {
        require_text("league", &self.league, 100)?;
        require_text("region", &self.region, 100)?;
        if !(MIN_PLAYER_AGE..=MAX_PLAYER_AGE).contains(&self.age) {
            return Err(SharedError::validation(
                "age",
                format!("Age must be between {} and {}", MIN_PLAYER_AGE, MAX_PLAYER_AGE),
            ));
        }
        if !(MIN_PLAYER_HEIGHT_CM..=MAX_PLAYER_HEIGHT_CM).contains(&self.height) {
            return Err(SharedError::validation(
                "height",
                format!(
                    "Height must be between {} and {} cm",
                    MIN_PLAYER_HEIGHT_CM, MAX_PLAYER_HEIGHT_CM
                ),
            ));
        }
        self.salary_range.validate()?;
        optional_text("description", self.description.as_deref(), 2000)?;
        resolve_end_date(self.end_date, now)
    }
}

/// Request body for `POST /api/club-advertisements`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClubAdvertisementRequest {
    pub club_name: String,
    pub position: Position,
    pub league: String,
    pub region: String,
    pub salary_range: SalaryRange,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

impl CreateClubAdvertisementRequest {
    pub fn validate(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, SharedError> {
        require_text("club_name", &self.club_name, 100)?;
        require_text("league", &self.league, 100)?;
        require_text("region", &self.region, 100)?;
        self.salary_range.validate()?;
        optional_text("description", self.description.as_deref(), 2000)?;
        resolve_end_date(self.end_date, now)
    }
}

/// Request body for `PUT /api/{player|club}-advertisements/{id}`
///
/// Only the fields that are present are changed. `description` is
/// tri-state: absent keeps it, `null` or a blank string clears it, text
/// replaces it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAdvertisementRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<SalaryRange>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

impl UpdateAdvertisementRequest {
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), SharedError> {
        if self.salary_range.is_none() && self.description.is_none() && self.end_date.is_none() {
            return Err(SharedError::validation("body", "Nothing to update"));
        }
        if let Some(range) = &self.salary_range {
            range.validate()?;
        }
        optional_text("description", self.description.as_ref().and_then(|d| d.as_deref()), 2000)?;
        if let Some(end_date) = self.end_date {
            resolve_end_date(Some(end_date), now)?;
        }
        Ok(())
    }

    /// `None` leaves the description alone, `Some(None)` clears it
    pub fn description_change(&self) -> Option<Option<String>> {
        self.description.as_ref().map(|d| {
            d.as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
        })
    }
}

/// Keeps an explicit `null` apart from a missing field: with
/// `#[serde(default)]` a missing field is `None` and `null` is `Some(None)`
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Sort order for advertisement listings
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdvertisementSort {
    #[default]
    Newest,
    Oldest,
    SalaryAsc,
    SalaryDesc,
}

impl AdvertisementSort {
    /// ORDER BY clause; the variants are fixed so this is safe to splice
    pub fn order_by(&self) -> &'static str {
        match self {
            AdvertisementSort::Newest => "a.created_at DESC",
            AdvertisementSort::Oldest => "a.created_at ASC",
            AdvertisementSort::SalaryAsc => "a.salary_min ASC, a.created_at DESC",
            AdvertisementSort::SalaryDesc => "a.salary_max DESC, a.created_at DESC",
        }
    }
}

/// Query string for advertisement listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvertisementQuery {
    pub search: Option<String>,
    pub position: Option<String>,
    pub league: Option<String>,
    pub region: Option<String>,
    pub active: Option<bool>,
    #[serde(default)]
    pub sort: AdvertisementSort,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl AdvertisementQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        (self.page() as i64 - 1) * self.page_size() as i64
    }

    /// Parsed position filter; an unknown position is a validation error
    pub fn position(&self) -> Result<Option<Position>, SharedError> {
        match self.position.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            None => Ok(None),
            Some(raw) => Position::from_str(raw)
                .map(Some)
                .ok_or_else(|| SharedError::validation("position", format!("Unknown position '{}'", raw))),
        }
    }

    /// Search term wrapped for ILIKE, or `None` when blank
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)))
    }
}

/// One page of a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> i64 {
        if self.total == 0 {
            0
        } else {
            (self.total + self.page_size as i64 - 1) / self.page_size as i64
        }
    }
}

fn resolve_end_date(
    end_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, SharedError> {
    let end_date = end_date.unwrap_or(now + Duration::days(DEFAULT_LIFETIME_DAYS));
    if end_date <= now {
        return Err(SharedError::validation("end_date", "End date must be in the future"));
    }
    if end_date > now + Duration::days(MAX_LIFETIME_DAYS) {
        return Err(SharedError::validation(
            "end_date",
            format!("End date cannot be more than {} days ahead", MAX_LIFETIME_DAYS),
        ));
    }
    Ok(end_date)
}

/// Reject blank or oversized required text fields
pub fn require_text(field: &str, value: &str, max_len: usize) -> Result<(), SharedError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SharedError::validation(field, format!("{} is required", field)));
    }
    if trimmed.chars().count() > max_len {
        return Err(SharedError::validation(
            field,
            format!("{} must be at most {} characters", field, max_len),
        ));
    }
    Ok(())
}

pub fn optional_text(field: &str, value: Option<&str>, max_len: usize) -> Result<(), SharedError> {
    match value {
        Some(v) if v.chars().count() > max_len => Err(SharedError::validation(
            field,
            format!("{} must be at most {} characters", field, max_len),
        )),
        _ => Ok(()),
    }
}

/// Escape backslash, `%` and `_` so user input matches literally in LIKE/ILIKE
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}
