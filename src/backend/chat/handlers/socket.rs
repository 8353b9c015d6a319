/**
 * Chat WebSocket Handler
 *
 * `GET /ws/chat?access_token=<jwt>` upgrades to a WebSocket carrying every
 * real-time event addressed to the signed-in user: chat messages, typing
 * indicators and offer notifications.
 *
 * # Client frames
 *
 * ```json
 * {"type":"send","chat_id":"...","content":"Hello"}
 * {"type":"typing","chat_id":"...","is_typing":true}
 * {"type":"ping"}
 * ```
 *
 * # Server frames
 *
 * Serialized `RealtimeEvent`s. A rejected client frame gets an `error`
 * event back; `ping` gets a `status` event with `"status":"pong"`.
 *
 * The token travels in the query string because browsers cannot set
 * headers on a WebSocket upgrade. An `Authorization` header is accepted
 * as well.
 */

use std::time::Duration;

use axum::{
    extract::{
        ws::{rejection::WebSocketUpgradeRejection, Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use serde::Deserialize;
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use uuid::Uuid;

use crate::backend::chat::handlers::rest::{deliver_message, other_participant};
use crate::backend::error::BackendError;
use crate::backend::middleware::{authenticate, bearer_token, ApiQuery};
use crate::backend::server::state::AppState;
use crate::shared::scouting::ClientFrame;
use crate::shared::RealtimeEvent;

const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(30);

#[derive(Debug, Default, Deserialize)]
pub struct SocketQuery {
    pub access_token: Option<String>,
}

/// `GET /ws/chat`
///
/// The caller is authenticated before the upgrade request itself is
/// checked, so a missing or bad token is always a 401.
pub async fn chat_socket(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SocketQuery>,
    headers: HeaderMap,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Result<Response, BackendError> {
    let token = match query.access_token.as_deref() {
        Some(token) => token,
        None => bearer_token(&headers)?,
    };
    let user = authenticate(&state, token).await?;

    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => {
            tracing::debug!("Chat socket upgrade for {} rejected: {}", user.user_id, rejection);
            return Ok(rejection.into_response());
        }
    };

    tracing::info!("Chat socket opened for {}", user.user_id);
    Ok(ws.on_upgrade(move |socket| run_socket(socket, state, user.user_id)))
}

async fn run_socket(socket: WebSocket, state: AppState, user_id: Uuid) {
    let (mut sender, mut receiver) = socket.split();
    let mut events = BroadcastStream::new(state.hub.subscribe(user_id));
    let mut keepalive = tokio::time::interval(KEEPALIVE_INTERVAL);

    if send_event(&mut sender, &RealtimeEvent::status("connected", None)).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            event = events.next() => match event {
                Some(Ok(event)) => {
                    if send_event(&mut sender, &event).await.is_err() {
                        break;
                    }
                }
                Some(Err(BroadcastStreamRecvError::Lagged(skipped))) => {
                    tracing::warn!("Chat socket of {} lagged, skipped {} events", user_id, skipped);
                }
                None => break,
            },
            frame = receiver.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    if let Some(reply) = handle_frame(&state, user_id, text.as_str()).await {
                        if send_event(&mut sender, &reply).await.is_err() {
                            break;
                        }
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!("Chat socket of {} failed: {:?}", user_id, e);
                    break;
                }
            },
            _ = keepalive.tick() => {
                if sender.send(Message::Ping(Bytes::new())).await.is_err() {
                    break;
                }
            }
        }
    }

    tracing::info!("Chat socket closed for {}", user_id);
}

async fn send_event(
    sender: &mut SplitSink<WebSocket, Message>,
    event: &RealtimeEvent,
) -> Result<(), axum::Error> {
    let text = match serde_json::to_string(event) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!("Failed to serialize event: {:?}", e);
            return Ok(());
        }
    };
    sender.send(Message::Text(text.into())).await
}

/// Act on one client frame
///
/// Returns the event to send back to this connection only. Messages
/// reach the sender through the hub like any other subscriber.
pub async fn handle_frame(state: &AppState, user_id: Uuid, text: &str) -> Option<RealtimeEvent> {
    let frame = match ClientFrame::parse(text) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::debug!("Rejected frame from {}: {}", user_id, e);
            return Some(RealtimeEvent::error("Unrecognised frame"));
        }
    };

    let result = match frame {
        ClientFrame::Ping => return Some(RealtimeEvent::status("pong", None)),
        ClientFrame::Send { chat_id, content } => match state.pool() {
            Ok(pool) => deliver_message(pool, &state.hub, user_id, chat_id, &content)
                .await
                .map(|_| ()),
            Err(e) => Err(e),
        },
        ClientFrame::Typing { chat_id, is_typing } => match state.pool() {
            Ok(pool) => other_participant(pool, chat_id, user_id).await.map(|other| {
                state
                    .hub
                    .publish(other, RealtimeEvent::typing(chat_id, user_id, is_typing));
            }),
            Err(e) => Err(e),
        },
    };

    result.err().map(|e| RealtimeEvent::error(e.message()))
}
