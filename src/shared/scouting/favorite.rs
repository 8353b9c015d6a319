//! Favorite Data Structures

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which kind of advertisement a favorite points at
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdvertisementKind {
    Player,
    Club,
}

impl AdvertisementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvertisementKind::Player => "player",
            AdvertisementKind::Club => "club",
        }
    }
}

/// Response for favorite add/remove
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FavoriteResponse {
    pub advertisement_id: Uuid,
    pub kind: AdvertisementKind,
    pub is_favorite: bool,
}

/// Response for the existence check
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FavoriteExistsResponse {
    pub exists: bool,
}
