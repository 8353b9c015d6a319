/**
 * Chat Route Configuration
 *
 * - `POST /api/chats`                  - get or create the chat with a user
 * - `GET  /api/chats`                  - the caller's chats
 * - `GET  /api/chats/{id}`             - one chat (participants only)
 * - `GET  /api/chats/{id}/messages`    - a page of messages, oldest first
 * - `POST /api/chats/{id}/messages`    - send a message
 * - `PUT  /api/chats/{id}/read`        - mark received messages read
 * - `GET  /ws/chat?access_token=`      - real-time WebSocket
 *
 * The REST routes go into the protected table. The WebSocket route
 * authenticates from its query string and is mounted separately.
 */

use axum::{
    routing::{get, put},
    Router,
};

use crate::backend::chat;
use crate::backend::server::state::AppState;

/// REST chat routes (require a token)
pub fn configure_chat_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/chats", get(chat::list_chats).post(chat::create_chat))
        .route("/api/chats/{id}", get(chat::get_chat))
        .route(
            "/api/chats/{id}/messages",
            get(chat::list_messages).post(chat::send_message),
        )
        .route("/api/chats/{id}/read", put(chat::mark_read))
}

/// The chat WebSocket
pub fn configure_socket_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/ws/chat", get(chat::chat_socket))
}
