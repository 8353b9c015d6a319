/**
 * Real-time Event System
 *
 * This module defines the events pushed to connected clients over the chat
 * WebSocket. Events can represent chat messages, typing indicators,
 * notifications about offers, and status frames.
 */
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::scouting::ChatMessage;

/// Type of real-time event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Chat message event
    Message,
    /// User notification event (offers received, offers decided)
    Notification,
    /// Status update event (pong, connection state)
    Status,
    /// Typing indicator event
    Typing,
    /// A client frame was rejected
    Error,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Message => "message",
            EventType::Notification => "notification",
            EventType::Status => "status",
            EventType::Typing => "typing",
            EventType::Error => "error",
        }
    }
}

/// Real-time event delivered to a subscriber
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RealtimeEvent {
    /// Type of event
    pub event_type: EventType,
    /// Event payload (JSON-serializable data)
    pub payload: serde_json::Value,
    /// RFC3339 timestamp when the event was created
    pub timestamp: String,
}

impl RealtimeEvent {
    /// Create a new real-time event
    pub fn new(event_type: EventType, payload: serde_json::Value) -> Self {
        Self {
            event_type,
            payload,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// Create a message event from a stored chat message
    pub fn message(message: &ChatMessage) -> Self {
        let payload = serde_json::to_value(message).unwrap_or(serde_json::Value::Null);
        Self::new(EventType::Message, payload)
    }

    /// Create a notification event
    pub fn notification(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            EventType::Notification,
            serde_json::json!({
                "title": title.into(),
                "message": message.into(),
            }),
        )
    }

    /// Create a status event
    pub fn status(status: impl Into<String>, details: Option<serde_json::Value>) -> Self {
        Self::new(
            EventType::Status,
            serde_json::json!({
                "status": status.into(),
                "details": details,
            }),
        )
    }

    /// Create a typing event
    pub fn typing(chat_id: Uuid, user_id: Uuid, is_typing: bool) -> Self {
        Self::new(
            EventType::Typing,
            serde_json::json!({
                "chat_id": chat_id,
                "user_id": user_id,
                "is_typing": is_typing,
            }),
        )
    }

    /// Create an error event sent back to the client that caused it
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(
            EventType::Error,
            serde_json::json!({ "message": message.into() }),
        )
    }
}
