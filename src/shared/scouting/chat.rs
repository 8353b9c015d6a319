//! Chat Data Structures
//!
//! A chat is a conversation between exactly two users. Messages are ordered
//! by the time the server stored them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::scouting::advertisement::require_text;

pub const MAX_MESSAGE_LEN: usize = 2000;
pub const DEFAULT_MESSAGE_PAGE: u32 = 50;
pub const MAX_MESSAGE_PAGE: u32 = 200;

/// A conversation between two users, seen from one participant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chat {
    pub id: Uuid,
    pub user1_id: Uuid,
    pub user2_id: Uuid,
    /// The participant that is not the caller
    pub other_user_id: Uuid,
    pub other_username: String,
    pub last_message_preview: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub unread_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Order a pair of user ids so that a pair always maps to the same chat row
pub fn ordered_pair(a: Uuid, b: Uuid) -> (Uuid, Uuid) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// A single stored chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub is_read: bool,
}

/// Request body for `POST /api/chats`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChatRequest {
    pub user_id: Uuid,
}

/// Request body for `POST /api/chats/{id}/messages`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

impl SendMessageRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_content(&self.content)
    }
}

pub fn validate_content(content: &str) -> Result<(), SharedError> {
    require_text("content", content, MAX_MESSAGE_LEN)
}

/// Query string for `GET /api/chats/{id}/messages`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListMessagesQuery {
    pub limit: Option<u32>,
    /// Only messages sent strictly before this instant
    pub before: Option<DateTime<Utc>>,
    /// Id of the oldest message already seen. With `before` it also admits
    /// messages sent at exactly `before` whose id sorts lower.
    pub before_id: Option<Uuid>,
}

impl ListMessagesQuery {
    pub fn limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_MESSAGE_PAGE)
            .clamp(1, MAX_MESSAGE_PAGE)
    }
}

/// Response for listing messages, oldest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMessagesResponse {
    pub messages: Vec<ChatMessage>,
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkReadResponse {
    pub updated: u64,
}

/// Frames a client may send over the chat WebSocket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    Send { chat_id: Uuid, content: String },
    Typing { chat_id: Uuid, is_typing: bool },
    Ping,
}

impl ClientFrame {
    pub fn parse(text: &str) -> Result<Self, SharedError> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_pair_is_symmetric() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(ordered_pair(a, b), ordered_pair(b, a));
        let (low, high) = ordered_pair(a, b);
        assert!(low < high);
    }

    #[test]
    fn test_parse_client_frames() {
        let chat_id = Uuid::new_v4();
        let send = format!(r#"{{"type":"send","chat_id":"{}","content":"Hello"}}"#, chat_id);
        assert_eq!(
            ClientFrame::parse(&send).unwrap(),
            ClientFrame::Send { chat_id, content: "Hello".to_string() }
        );

        let typing = format!(r#"{{"type":"typing","chat_id":"{}","is_typing":false}}"#, chat_id);
        assert_eq!(
            ClientFrame::parse(&typing).unwrap(),
            ClientFrame::Typing { chat_id, is_typing: false }
        );

        assert_eq!(ClientFrame::parse(r#"{"type":"ping"}"#).unwrap(), ClientFrame::Ping);
    }

    #[test]
    fn test_reject_unknown_frame() {
        assert!(ClientFrame::parse(r#"{"type":"join","group":"x"}"#).is_err());
        assert!(ClientFrame::parse("not json").is_err());
    }

    #[test]
    fn test_message_content_limits() {
        assert!(validate_content("Hi").is_ok());
        assert!(validate_content("   ").is_err());
        assert!(validate_content(&"a".repeat(MAX_MESSAGE_LEN + 1)).is_err());
    }

    #[test]
    fn test_message_page_limit_is_clamped() {
        assert_eq!(ListMessagesQuery::default().limit(), DEFAULT_MESSAGE_PAGE);
        let query = ListMessagesQuery { limit: Some(0), ..Default::default() };
        assert_eq!(query.limit(), 1);
        let query = ListMessagesQuery { limit: Some(5000), ..Default::default() };
        assert_eq!(query.limit(), MAX_MESSAGE_PAGE);
    }
}
