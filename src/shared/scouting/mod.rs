//! Scouting Module
//!
//! This module contains all the data structures for the marketplace:
//!
//! - `PlayerAdvertisement` / `ClubAdvertisement` - listings
//! - `PlayerOffer` / `ClubOffer` - responses to listings
//! - `Problem` - support tickets
//! - `Chat` / `ChatMessage` - two-party conversations
//!
//! # Usage
//!
//! ```rust
//! use scoutlink::shared::scouting::{Position, SalaryRange};
//!
//! let range = SalaryRange::new(1000.0, 2000.0).unwrap();
//! assert!(range.contains(1500.0));
//! assert_eq!(Position::Striker.code(), "ST");
//! ```

pub mod advertisement;
pub mod chat;
pub mod favorite;
pub mod offer;
pub mod problem;
pub mod user;

// Re-export all types
pub use advertisement::{
    escape_like, AdvertisementQuery, AdvertisementSort, ClubAdvertisement, CreateClubAdvertisementRequest,
    CreatePlayerAdvertisementRequest, Page, PlayerAdvertisement, Position, PositionInfo,
    PreferredFoot, SalaryRange, UpdateAdvertisementRequest,
};
pub use chat::{
    Chat, ChatMessage, ClientFrame, CreateChatRequest, ListMessagesQuery, ListMessagesResponse,
    MarkReadResponse, SendMessageRequest,
};
pub use favorite::{AdvertisementKind, FavoriteExistsResponse, FavoriteResponse};
pub use offer::{
    ClubOffer, CreateClubOfferRequest, CreatePlayerOfferRequest, OfferStatus, OfferStatusInfo,
    PlayerOffer,
};
pub use problem::{CreateProblemRequest, Problem, ProblemQuery, UnsolvedCountResponse};
pub use user::{PublicProfile, UserRole};
