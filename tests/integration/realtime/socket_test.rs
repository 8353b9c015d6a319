//! WebSocket frames delivered through the hub to both chat participants

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use serial_test::serial;
use tokio::sync::broadcast::error::TryRecvError;
use uuid::Uuid;

use scoutlink::backend::chat::handlers::socket::handle_frame;
use scoutlink::backend::server::AppState;
use scoutlink::shared::{AppConfig, EventType};

use crate::common::{server_with_database, signup_user, TestDatabase};

#[tokio::test]
#[serial]
async fn test_socket_frames_reach_the_other_participant() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = server_with_database(db.url()).await;

    let _admin = signup_user(&server, "socket_admin").await;
    let scout = signup_user(&server, "sock_scout").await;
    let player = signup_user(&server, "sock_player").await;
    let outsider = signup_user(&server, "sock_outsider").await;

    let chat: Value = server
        .post("/api/chats")
        .authorization_bearer(&scout.token)
        .json(&json!({"user_id": player.id}))
        .await
        .json();
    let chat_id = chat["id"].as_str().expect("chat id").to_string();

    let state = AppState::new(Some(db.pool().clone()), AppConfig::default());
    let mut scout_rx = state.hub.subscribe(scout.id);
    let mut player_rx = state.hub.subscribe(player.id);

    let send = json!({"type": "send", "chat_id": chat_id, "content": "  Trial moved to 10am  "});
    let reply = handle_frame(&state, scout.id, &send.to_string()).await;
    assert!(reply.is_none(), "unexpected reply: {:?}", reply);

    let delivered = player_rx.recv().await.expect("message for the receiver");
    assert_eq!(delivered.event_type, EventType::Message);
    assert_eq!(delivered.payload["content"], "Trial moved to 10am");
    assert_eq!(delivered.payload["sender_id"], scout.id.to_string());

    let echoed = scout_rx.recv().await.expect("message echoed to the sender");
    assert_eq!(echoed.payload["id"], delivered.payload["id"]);

    let typing = json!({"type": "typing", "chat_id": chat_id, "is_typing": true});
    assert!(handle_frame(&state, player.id, &typing.to_string()).await.is_none());

    let indicator = scout_rx.recv().await.expect("typing event for the other user");
    assert_eq!(indicator.event_type, EventType::Typing);
    assert_eq!(indicator.payload["user_id"], player.id.to_string());
    assert_eq!(indicator.payload["is_typing"], true);
    assert!(matches!(player_rx.try_recv(), Err(TryRecvError::Empty)));

    let intruder = handle_frame(&state, outsider.id, &send.to_string())
        .await
        .expect("error reply for a non-participant");
    assert_eq!(intruder.event_type, EventType::Error);
    assert!(matches!(player_rx.try_recv(), Err(TryRecvError::Empty)));

    let unknown_chat = json!({"type": "typing", "chat_id": Uuid::new_v4(), "is_typing": false});
    let reply = handle_frame(&state, scout.id, &unknown_chat.to_string())
        .await
        .expect("error reply for an unknown chat");
    assert_eq!(reply.event_type, EventType::Error);

    let history: Value = server
        .get(&format!("/api/chats/{}/messages", chat_id))
        .authorization_bearer(&player.token)
        .await
        .json();
    assert_eq!(history["messages"].as_array().map(Vec::len), Some(1));
}
