//! Chats and messages over REST, with delivery through the hub

use axum::http::StatusCode;
use serde_json::{json, Value};
use serial_test::serial;

use chrono::{SubsecRound, Utc};
use uuid::Uuid;

use crate::common::{server_with_database, signup_user, TestDatabase};

#[tokio::test]
#[serial]
async fn test_chat_flow() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = server_with_database(db.url()).await;

    let _admin = signup_user(&server, "chat_admin").await;
    let scout = signup_user(&server, "sam_scout").await;
    let player = signup_user(&server, "pia_player").await;
    let outsider = signup_user(&server, "olly_outsider").await;

    let with_self = server
        .post("/api/chats")
        .authorization_bearer(&scout.token)
        .json(&json!({"user_id": scout.id}))
        .await;
    assert_eq!(with_self.status_code(), StatusCode::BAD_REQUEST);

    let first: Value = server
        .post("/api/chats")
        .authorization_bearer(&scout.token)
        .json(&json!({"user_id": player.id}))
        .await
        .json();
    let second: Value = server
        .post("/api/chats")
        .authorization_bearer(&player.token)
        .json(&json!({"user_id": scout.id}))
        .await
        .json();
    assert_eq!(first["id"], second["id"]);
    assert_eq!(first["other_username"], "pia_player");
    assert_eq!(second["other_username"], "sam_scout");
    let chat_id = first["id"].as_str().expect("chat id").to_string();

    let sent = server
        .post(&format!("/api/chats/{}/messages", chat_id))
        .authorization_bearer(&scout.token)
        .json(&json!({"content": "Are you free for a trial on Saturday?"}))
        .await;
    assert_eq!(sent.status_code(), StatusCode::CREATED);
    let sent: Value = sent.json();
    assert_eq!(sent["receiver_id"], player.id.to_string());

    let blank = server
        .post(&format!("/api/chats/{}/messages", chat_id))
        .authorization_bearer(&scout.token)
        .json(&json!({"content": "   "}))
        .await;
    assert_eq!(blank.status_code(), StatusCode::BAD_REQUEST);

    let outsider_read = server
        .get(&format!("/api/chats/{}/messages", chat_id))
        .authorization_bearer(&outsider.token)
        .await;
    assert_eq!(outsider_read.status_code(), StatusCode::FORBIDDEN);

    let chats: Value = server
        .get("/api/chats")
        .authorization_bearer(&player.token)
        .await
        .json();
    assert_eq!(chats[0]["unread_count"], 1);
    assert_eq!(chats[0]["last_message_preview"], "Are you free for a trial on Saturday?");

    let page: Value = server
        .get(&format!("/api/chats/{}/messages?limit=10", chat_id))
        .authorization_bearer(&player.token)
        .await
        .json();
    assert_eq!(page["messages"].as_array().map(Vec::len), Some(1));
    assert_eq!(page["has_more"], false);

    let read: Value = server
        .put(&format!("/api/chats/{}/read", chat_id))
        .authorization_bearer(&player.token)
        .await
        .json();
    assert_eq!(read["updated"], 1);

    let missing = server
        .get(&format!("/api/chats/{}", uuid::Uuid::new_v4()))
        .authorization_bearer(&player.token)
        .await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn test_message_pages_split_equal_timestamps() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = server_with_database(db.url()).await;

    let _admin = signup_user(&server, "page_admin").await;
    let coach = signup_user(&server, "page_coach").await;
    let winger = signup_user(&server, "page_winger").await;

    let chat: Value = server
        .post("/api/chats")
        .authorization_bearer(&coach.token)
        .json(&json!({"user_id": winger.id}))
        .await
        .json();
    let chat_id = Uuid::parse_str(chat["id"].as_str().expect("chat id")).expect("uuid");

    let sent_at = Utc::now().trunc_subsecs(6);
    for content in ["one", "two", "three"] {
        sqlx::query(
            "INSERT INTO chat_messages (id, chat_id, sender_id, receiver_id, content, sent_at, is_read) \
             VALUES ($1, $2, $3, $4, $5, $6, FALSE)",
        )
        .bind(Uuid::new_v4())
        .bind(chat_id)
        .bind(coach.id)
        .bind(winger.id)
        .bind(content)
        .bind(sent_at)
        .execute(db.pool())
        .await
        .expect("insert message");
    }

    let path = format!("/api/chats/{}/messages", chat_id);
    let first: Value = server
        .get(&path)
        .add_query_param("limit", 2)
        .authorization_bearer(&winger.token)
        .await
        .json();
    assert_eq!(first["has_more"], true);
    let first = first["messages"].as_array().expect("messages").clone();
    assert_eq!(first.len(), 2);

    let second: Value = server
        .get(&path)
        .add_query_param("limit", 2)
        .add_query_param("before", first[0]["sent_at"].as_str().expect("sent_at"))
        .add_query_param("before_id", first[0]["id"].as_str().expect("id"))
        .authorization_bearer(&winger.token)
        .await
        .json();
    assert_eq!(second["has_more"], false);
    let second = second["messages"].as_array().expect("messages").clone();
    assert_eq!(second.len(), 1);

    let mut ids: Vec<&str> = first
        .iter()
        .chain(second.iter())
        .filter_map(|m| m["id"].as_str())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}
