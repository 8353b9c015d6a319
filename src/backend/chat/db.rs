/**
 * Chat Database Operations
 *
 * A chat row stores its two participants ordered (`user1_id < user2_id`),
 * so one pair of users always maps to the same row. Listing queries are
 * written from one participant's point of view and resolve the other
 * participant's username along with the latest message.
 */

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::scouting::chat::ordered_pair;
use crate::shared::scouting::{Chat, ChatMessage};

const CHAT_SELECT: &str = r#"
    SELECT c.id, c.user1_id, c.user2_id, c.created_at,
           o.id AS other_user_id, o.username AS other_username,
           last.content AS last_message_preview, last.sent_at AS last_message_at,
           (SELECT COUNT(*) FROM chat_messages m
             WHERE m.chat_id = c.id AND m.receiver_id = $1 AND m.is_read = FALSE) AS unread_count
    FROM chats c
    JOIN users o ON o.id = CASE WHEN c.user1_id = $1 THEN c.user2_id ELSE c.user1_id END
    LEFT JOIN LATERAL (
        SELECT content, sent_at FROM chat_messages
        WHERE chat_id = c.id ORDER BY sent_at DESC LIMIT 1
    ) last ON TRUE
"#;

const PREVIEW_LEN: usize = 80;

#[derive(Debug, sqlx::FromRow)]
pub struct ChatRow {
    pub id: Uuid,
    pub user1_id: Uuid,
    pub user2_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub other_user_id: Uuid,
    pub other_username: String,
    pub last_message_preview: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub unread_count: i64,
}

impl From<ChatRow> for Chat {
    fn from(row: ChatRow) -> Self {
        Chat {
            id: row.id,
            user1_id: row.user1_id,
            user2_id: row.user2_id,
            other_user_id: row.other_user_id,
            other_username: row.other_username,
            last_message_preview: row.last_message_preview.map(|text| preview(&text)),
            last_message_at: row.last_message_at,
            unread_count: row.unread_count,
            created_at: row.created_at,
        }
    }
}

/// First characters of a message, cut on a char boundary
pub fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_LEN {
        return text.to_string();
    }
    let cut: String = text.chars().take(PREVIEW_LEN).collect();
    format!("{}…", cut)
}

#[derive(Debug, sqlx::FromRow)]
pub struct MessageRow {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub is_read: bool,
}

impl From<MessageRow> for ChatMessage {
    fn from(row: MessageRow) -> Self {
        ChatMessage {
            id: row.id,
            chat_id: row.chat_id,
            sender_id: row.sender_id,
            receiver_id: row.receiver_id,
            content: row.content,
            sent_at: row.sent_at,
            is_read: row.is_read,
        }
    }
}

/// Participants of a chat, if it exists
pub async fn chat_participants(pool: &PgPool, chat_id: Uuid) -> Result<Option<(Uuid, Uuid)>, sqlx::Error> {
    sqlx::query_as::<_, (Uuid, Uuid)>("SELECT user1_id, user2_id FROM chats WHERE id = $1")
        .bind(chat_id)
        .fetch_optional(pool)
        .await
}

/// Find the chat between two users or create it
///
/// Concurrent calls for the same pair converge on one row through the
/// unique constraint.
pub async fn get_or_create_chat(pool: &PgPool, a: Uuid, b: Uuid) -> Result<Uuid, sqlx::Error> {
    let (user1_id, user2_id) = ordered_pair(a, b);
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO chats (id, user1_id, user2_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $4)
        ON CONFLICT (user1_id, user2_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user1_id)
    .bind(user2_id)
    .bind(now)
    .execute(pool)
    .await?;

    sqlx::query_scalar("SELECT id FROM chats WHERE user1_id = $1 AND user2_id = $2")
        .bind(user1_id)
        .bind(user2_id)
        .fetch_one(pool)
        .await
}

/// A chat as seen by `viewer`
pub async fn get_chat(pool: &PgPool, viewer: Uuid, chat_id: Uuid) -> Result<Option<Chat>, sqlx::Error> {
    let sql = format!("{} WHERE c.id = $2 AND (c.user1_id = $1 OR c.user2_id = $1)", CHAT_SELECT);
    let row = sqlx::query_as::<_, ChatRow>(&sql)
        .bind(viewer)
        .bind(chat_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Chat::from))
}

/// The viewer's chats, most recent activity first
pub async fn list_chats(pool: &PgPool, viewer: Uuid) -> Result<Vec<Chat>, sqlx::Error> {
    let sql = format!(
        "{} WHERE c.user1_id = $1 OR c.user2_id = $1 \
         ORDER BY COALESCE(last.sent_at, c.created_at) DESC",
        CHAT_SELECT
    );
    let rows = sqlx::query_as::<_, ChatRow>(&sql)
        .bind(viewer)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Chat::from).collect())
}

pub async fn insert_message(
    pool: &PgPool,
    chat_id: Uuid,
    sender_id: Uuid,
    receiver_id: Uuid,
    content: &str,
) -> Result<ChatMessage, sqlx::Error> {
    let now = Utc::now();
    let row = sqlx::query_as::<_, MessageRow>(
        r#"
        INSERT INTO chat_messages (id, chat_id, sender_id, receiver_id, content, is_read, sent_at)
        VALUES ($1, $2, $3, $4, $5, FALSE, $6)
        RETURNING id, chat_id, sender_id, receiver_id, content, sent_at, is_read
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(chat_id)
    .bind(sender_id)
    .bind(receiver_id)
    .bind(content)
    .bind(now)
    .fetch_one(pool)
    .await?;

    sqlx::query("UPDATE chats SET updated_at = $1 WHERE id = $2")
        .bind(now)
        .bind(chat_id)
        .execute(pool)
        .await?;

    Ok(row.into())
}

/// A page of messages, oldest first
///
/// Pages walk backwards on `(sent_at, id)`, so messages sharing a timestamp
/// are neither skipped nor repeated at page boundaries. Fetches one extra
/// row to know whether older messages remain.
pub async fn list_messages(
    pool: &PgPool,
    chat_id: Uuid,
    before: Option<DateTime<Utc>>,
    before_id: Option<Uuid>,
    limit: u32,
) -> Result<(Vec<ChatMessage>, bool), sqlx::Error> {
    let mut rows = sqlx::query_as::<_, MessageRow>(
        r#"
        SELECT id, chat_id, sender_id, receiver_id, content, sent_at, is_read
        FROM chat_messages
        WHERE chat_id = $1
          AND ($2::TIMESTAMPTZ IS NULL
               OR sent_at < $2
               OR ($3::UUID IS NOT NULL AND sent_at = $2 AND id < $3))
        ORDER BY sent_at DESC, id DESC
        LIMIT $4
        "#,
    )
    .bind(chat_id)
    .bind(before)
    .bind(before_id)
    .bind(i64::from(limit) + 1)
    .fetch_all(pool)
    .await?;

    let has_more = rows.len() > limit as usize;
    rows.truncate(limit as usize);
    rows.reverse();
    Ok((rows.into_iter().map(ChatMessage::from).collect(), has_more))
}

/// Mark every message addressed to `reader` in a chat as read
pub async fn mark_read(pool: &PgPool, chat_id: Uuid, reader: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE chat_messages SET is_read = TRUE \
         WHERE chat_id = $1 AND receiver_id = $2 AND is_read = FALSE",
    )
    .bind(chat_id)
    .bind(reader)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
