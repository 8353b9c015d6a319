/**
 * Chat REST Handlers
 *
 * Storing a message and pushing it to both participants happens in
 * `deliver_message`, which the WebSocket handler shares.
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::users::get_user_by_id;
use crate::backend::chat::db;
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::{ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::backend::realtime::ChatHub;
use crate::backend::server::state::{require_pool, AppState};
use crate::shared::scouting::chat::validate_content;
use crate::shared::scouting::{
    Chat, ChatMessage, CreateChatRequest, ListMessagesQuery, ListMessagesResponse,
    MarkReadResponse, SendMessageRequest,
};
use crate::shared::RealtimeEvent;

/// Resolve the other participant of a chat, checking that `user_id` is one
///
/// 404 when the chat does not exist, 403 when the caller is not in it.
pub async fn other_participant(pool: &PgPool, chat_id: Uuid, user_id: Uuid) -> Result<Uuid, BackendError> {
    let (user1_id, user2_id) = db::chat_participants(pool, chat_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Chat not found"))?;

    if user1_id == user_id {
        Ok(user2_id)
    } else if user2_id == user_id {
        Ok(user1_id)
    } else {
        tracing::warn!("User {} tried to access chat {}", user_id, chat_id);
        Err(BackendError::forbidden("You are not a participant of this chat"))
    }
}

/// Store a message and push it to both participants
pub async fn deliver_message(
    pool: &PgPool,
    hub: &ChatHub,
    sender_id: Uuid,
    chat_id: Uuid,
    content: &str,
) -> Result<ChatMessage, BackendError> {
    validate_content(content)?;
    let receiver_id = other_participant(pool, chat_id, sender_id).await?;

    let message = db::insert_message(pool, chat_id, sender_id, receiver_id, content.trim()).await?;
    let reached = hub.publish_many(&[sender_id, receiver_id], RealtimeEvent::message(&message));
    tracing::debug!("Message {} in chat {} reached {} connections", message.id, chat_id, reached);

    Ok(message)
}

/// `POST /api/chats` - open (or reopen) the chat with another user
pub async fn create_chat(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreateChatRequest>,
) -> ApiResult<Json<Chat>> {
    let pool = require_pool(pool)?;
    if request.user_id == user.user_id {
        return Err(BackendError::bad_request("You cannot start a chat with yourself"));
    }
    if get_user_by_id(&pool, request.user_id).await?.is_none() {
        return Err(BackendError::not_found("User not found"));
    }

    let chat_id = db::get_or_create_chat(&pool, user.user_id, request.user_id).await?;
    let chat = db::get_chat(&pool, user.user_id, chat_id)
        .await?
        .ok_or_else(|| BackendError::state("Chat not readable after creation"))?;
    Ok(Json(chat))
}

/// `GET /api/chats`
pub async fn list_chats(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<Vec<Chat>>> {
    let pool = require_pool(pool)?;
    Ok(Json(db::list_chats(&pool, user.user_id).await?))
}

/// `GET /api/chats/{id}`
pub async fn get_chat(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    ApiPath(chat_id): ApiPath<Uuid>,
) -> ApiResult<Json<Chat>> {
    let pool = require_pool(pool)?;
    other_participant(&pool, chat_id, user.user_id).await?;
    let chat = db::get_chat(&pool, user.user_id, chat_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Chat not found"))?;
    Ok(Json(chat))
}

/// `GET /api/chats/{id}/messages?limit=&before=&before_id=`
pub async fn list_messages(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    ApiPath(chat_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<ListMessagesQuery>,
) -> ApiResult<Json<ListMessagesResponse>> {
    let pool = require_pool(pool)?;
    other_participant(&pool, chat_id, user.user_id).await?;

    let (messages, has_more) =
        db::list_messages(&pool, chat_id, query.before, query.before_id, query.limit()).await?;
    Ok(Json(ListMessagesResponse { messages, has_more }))
}

/// `POST /api/chats/{id}/messages`
pub async fn send_message(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(chat_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<SendMessageRequest>,
) -> ApiResult<(StatusCode, Json<ChatMessage>)> {
    let pool = state.pool()?;
    request.validate()?;
    let message = deliver_message(pool, &state.hub, user.user_id, chat_id, &request.content).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// `PUT /api/chats/{id}/read`
pub async fn mark_read(
    State(pool): State<Option<PgPool>>,
    AuthUser(user): AuthUser,
    ApiPath(chat_id): ApiPath<Uuid>,
) -> ApiResult<Json<MarkReadResponse>> {
    let pool = require_pool(pool)?;
    other_participant(&pool, chat_id, user.user_id).await?;
    let updated = db::mark_read(&pool, chat_id, user.user_id).await?;
    Ok(Json(MarkReadResponse { updated }))
}
