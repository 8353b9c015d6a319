//! Advertisement ownership, expiry and the club offer flow

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use serial_test::serial;

use crate::common::{server_with_database, signup_user, TestDatabase, TestUser};

async fn create_ad(server: &TestServer, owner: &TestUser, path: &str, body: Value) -> String {
    let response = server
        .post(path)
        .authorization_bearer(&owner.token)
        .json(&body)
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
    response.json::<Value>()["id"]
        .as_str()
        .expect("advertisement id")
        .to_string()
}

fn player_ad() -> Value {
    json!({
        "position": "left_winger",
        "league": "League Two",
        "region": "Midlands",
        "age": 20,
        "height": 175,
        "preferred_foot": "both",
        "salary_range": {"min": 800.0, "max": 1200.0},
        "description": "Academy graduate"
    })
}

fn club_ad() -> Value {
    json!({
        "club_name": "Riverside Athletic",
        "position": "goalkeeper",
        "league": "League Two",
        "region": "Midlands",
        "salary_range": {"min": 1000.0, "max": 1800.0}
    })
}

#[tokio::test]
#[serial]
async fn test_only_owner_or_admin_may_change_advertisements() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = server_with_database(db.url()).await;

    let admin = signup_user(&server, "ad_admin").await;
    let owner = signup_user(&server, "ad_owner").await;
    let stranger = signup_user(&server, "ad_stranger").await;
    assert_eq!(admin.role, "admin");

    let ad_id = create_ad(&server, &owner, "/api/player-advertisements", player_ad()).await;
    let path = format!("/api/player-advertisements/{}", ad_id);

    let edit = server
        .put(&path)
        .authorization_bearer(&stranger.token)
        .json(&json!({"description": "Hijacked"}))
        .await;
    crate::assert_error_body!(edit, StatusCode::FORBIDDEN);

    let delete = server.delete(&path).authorization_bearer(&stranger.token).await;
    crate::assert_error_body!(delete, StatusCode::FORBIDDEN);

    let edited: Value = server
        .put(&path)
        .authorization_bearer(&owner.token)
        .json(&json!({"description": "Now open to loans"}))
        .await
        .json();
    assert_eq!(edited["description"], "Now open to loans");

    let cleared = server
        .put(&path)
        .authorization_bearer(&owner.token)
        .json(&json!({"description": null}))
        .await;
    assert_eq!(cleared.status_code(), StatusCode::OK);
    assert_eq!(cleared.json::<Value>()["description"], Value::Null);

    let by_admin = server
        .put(&path)
        .authorization_bearer(&admin.token)
        .json(&json!({"salary_range": {"min": 900.0, "max": 1300.0}}))
        .await;
    assert_eq!(by_admin.status_code(), StatusCode::OK);
    assert_eq!(by_admin.json::<Value>()["salary_range"]["min"], 900.0);

    let removed = server.delete(&path).authorization_bearer(&admin.token).await;
    assert_eq!(removed.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(server.get(&path).await.status_code(), StatusCode::NOT_FOUND);

    let club_id = create_ad(&server, &owner, "/api/club-advertisements", club_ad()).await;
    let club_path = format!("/api/club-advertisements/{}", club_id);

    let delete = server.delete(&club_path).authorization_bearer(&stranger.token).await;
    crate::assert_error_body!(delete, StatusCode::FORBIDDEN);

    let removed = server.delete(&club_path).authorization_bearer(&owner.token).await;
    assert_eq!(removed.status_code(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[serial]
async fn test_offers_on_expired_advertisements_are_rejected() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = server_with_database(db.url()).await;

    let _admin = signup_user(&server, "exp_admin").await;
    let player = signup_user(&server, "exp_player").await;
    let club = signup_user(&server, "exp_club").await;

    let player_ad_id = create_ad(&server, &player, "/api/player-advertisements", player_ad()).await;
    let club_ad_id = create_ad(&server, &club, "/api/club-advertisements", club_ad()).await;

    for table in ["player_advertisements", "club_advertisements"] {
        sqlx::query(&format!(
            "UPDATE {} SET end_date = NOW() - INTERVAL '1 day'",
            table
        ))
        .execute(db.pool())
        .await
        .expect("expire advertisements");
    }

    let expired: Value = server
        .get(&format!("/api/player-advertisements/{}", player_ad_id))
        .await
        .json();
    assert_eq!(expired["is_active"], false);

    let inactive: Value = server.get("/api/club-advertisements?active=false").await.json();
    assert_eq!(inactive["total"], 1);
    let active: Value = server.get("/api/club-advertisements?active=true").await.json();
    assert_eq!(active["total"], 0);

    let player_offer = server
        .post("/api/player-offers")
        .authorization_bearer(&club.token)
        .json(&json!({
            "player_advertisement_id": player_ad_id,
            "club_name": "Riverside Athletic",
            "league": "League Two",
            "region": "Midlands",
            "salary": 1000.0
        }))
        .await;
    crate::assert_error_body!(player_offer, StatusCode::BAD_REQUEST);

    let club_offer = server
        .post("/api/club-offers")
        .authorization_bearer(&player.token)
        .json(&json!({"club_advertisement_id": club_ad_id, "salary": 1500.0}))
        .await;
    crate::assert_error_body!(club_offer, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn test_club_offer_lifecycle() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = server_with_database(db.url()).await;

    let _admin = signup_user(&server, "club_flow_admin").await;
    let club = signup_user(&server, "club_member").await;
    let keeper = signup_user(&server, "keen_keeper").await;
    let backup = signup_user(&server, "backup_keeper").await;
    let ad_id = create_ad(&server, &club, "/api/club-advertisements", club_ad()).await;
    let offer = json!({
        "club_advertisement_id": ad_id,
        "salary": 1500.0,
        "additional_information": "Available from July"
    });

    let own = server
        .post("/api/club-offers")
        .authorization_bearer(&club.token)
        .json(&offer)
        .await;
    assert_eq!(own.status_code(), StatusCode::FORBIDDEN);

    let created = server
        .post("/api/club-offers")
        .authorization_bearer(&keeper.token)
        .json(&offer)
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED, "{}", created.text());
    let created: Value = created.json();
    assert_eq!(created["status"], "offered");
    assert_eq!(created["position"], "goalkeeper");
    let offer_id = created["id"].as_str().expect("offer id").to_string();

    let duplicate = server
        .post("/api/club-offers")
        .authorization_bearer(&keeper.token)
        .json(&offer)
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);

    let second: Value = server
        .post("/api/club-offers")
        .authorization_bearer(&backup.token)
        .json(&offer)
        .await
        .json();
    let second_id = second["id"].as_str().expect("offer id").to_string();

    let received: Value = server
        .get("/api/club-offers/received")
        .authorization_bearer(&club.token)
        .await
        .json();
    assert_eq!(received.as_array().map(Vec::len), Some(2));

    let sent: Value = server
        .get("/api/club-offers/sent")
        .authorization_bearer(&keeper.token)
        .await
        .json();
    assert_eq!(sent.as_array().map(Vec::len), Some(1));

    let by_author = server
        .put(&format!("/api/club-offers/{}/reject", offer_id))
        .authorization_bearer(&keeper.token)
        .await;
    assert_eq!(by_author.status_code(), StatusCode::FORBIDDEN);

    let rejected = server
        .put(&format!("/api/club-offers/{}/reject", offer_id))
        .authorization_bearer(&club.token)
        .await;
    assert_eq!(rejected.status_code(), StatusCode::OK);
    assert_eq!(rejected.json::<Value>()["status"], "rejected");

    let reversed = server
        .put(&format!("/api/club-offers/{}/accept", offer_id))
        .authorization_bearer(&club.token)
        .await;
    assert_eq!(reversed.status_code(), StatusCode::CONFLICT);

    let not_author = server
        .delete(&format!("/api/club-offers/{}", second_id))
        .authorization_bearer(&keeper.token)
        .await;
    assert_eq!(not_author.status_code(), StatusCode::FORBIDDEN);

    let withdrawn = server
        .delete(&format!("/api/club-offers/{}", second_id))
        .authorization_bearer(&backup.token)
        .await;
    assert_eq!(withdrawn.status_code(), StatusCode::NO_CONTENT);

    let received: Value = server
        .get("/api/club-offers/received")
        .authorization_bearer(&club.token)
        .await
        .json();
    assert_eq!(received.as_array().map(Vec::len), Some(1));
    assert_eq!(received[0]["status"], "rejected");
}
