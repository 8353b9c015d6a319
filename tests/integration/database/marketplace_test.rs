//! Advertisements, offers, favorites, problems and administration

use axum::http::{header, StatusCode};
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use serial_test::serial;

use scoutlink::backend::auth::users::{create_user, NewUser};

use crate::common::{server_with_database, signup_user, TestDatabase, TestUser};

async fn create_player_advertisement(server: &TestServer, player: &TestUser) -> String {
    let response = server
        .post("/api/player-advertisements")
        .authorization_bearer(&player.token)
        .json(&json!({
            "position": "striker",
            "league": "National League",
            "region": "North West",
            "age": 23,
            "height": 182,
            "preferred_foot": "left",
            "salary_range": {"min": 1500.0, "max": 2500.0},
            "description": "Quick, two-footed finisher"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());

    let body: Value = response.json();
    assert_eq!(body["is_active"], true);
    body["id"].as_str().expect("advertisement id").to_string()
}

#[tokio::test]
#[serial]
async fn test_first_signup_becomes_admin() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = server_with_database(db.url()).await;

    let first = signup_user(&server, "first_admin").await;
    let second = signup_user(&server, "second_user").await;
    assert_eq!(first.role, "admin");
    assert_eq!(second.role, "user");

    let duplicate = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "second_user",
            "email": "other@example.com",
            "password": "long-enough-1",
            "first_name": "Dup",
            "last_name": "User"
        }))
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);

    let login = server
        .post("/api/auth/login")
        .json(&json!({"username": second.email, "password": crate::common::TEST_PASSWORD}))
        .await;
    assert_eq!(login.status_code(), StatusCode::OK);

    let wrong = server
        .post("/api/auth/login")
        .json(&json!({"username": "second_user", "password": "nope-nope-nope"}))
        .await;
    assert_eq!(wrong.status_code(), StatusCode::UNAUTHORIZED);
}

fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password_hash: "not-a-real-hash".to_string(),
        first_name: "Race".to_string(),
        last_name: username.to_string(),
        phone_number: None,
        location: None,
    }
}

#[tokio::test]
#[serial]
async fn test_concurrent_first_signups_yield_one_admin() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };

    let signups = (0..4).map(|i| {
        let pool = db.pool().clone();
        tokio::spawn(async move { create_user(&pool, new_user(&format!("racer_{}", i))).await })
    });
    let mut admins = 0;
    for signup in signups.collect::<Vec<_>>() {
        let user = signup.await.expect("signup task").expect("create user");
        if user.role == "admin" {
            admins += 1;
        }
    }
    assert_eq!(admins, 1);

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = 'admin'")
        .fetch_one(db.pool())
        .await
        .expect("count admins");
    assert_eq!(stored, 1);
}

#[tokio::test]
#[serial]
async fn test_offer_lifecycle() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = server_with_database(db.url()).await;

    let _admin = signup_user(&server, "league_admin").await;
    let player = signup_user(&server, "pat_player").await;
    let club = signup_user(&server, "cleo_club").await;
    let ad_id = create_player_advertisement(&server, &player).await;

    let listing: Value = server.get("/api/player-advertisements?position=striker").await.json();
    assert_eq!(listing["total"], 1);

    let offer = json!({
        "player_advertisement_id": ad_id,
        "club_name": "Harbour FC",
        "league": "National League",
        "region": "North West",
        "salary": 2000.0,
        "additional_information": "Trial next week"
    });

    let own = server
        .post("/api/player-offers")
        .authorization_bearer(&player.token)
        .json(&offer)
        .await;
    assert_eq!(own.status_code(), StatusCode::FORBIDDEN);

    let created = server
        .post("/api/player-offers")
        .authorization_bearer(&club.token)
        .json(&offer)
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED, "{}", created.text());
    let created: Value = created.json();
    assert_eq!(created["status"], "offered");
    assert_eq!(created["position"], "striker");
    let offer_id = created["id"].as_str().expect("offer id").to_string();

    let duplicate = server
        .post("/api/player-offers")
        .authorization_bearer(&club.token)
        .json(&offer)
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);

    let received: Value = server
        .get("/api/player-offers/received")
        .authorization_bearer(&player.token)
        .await
        .json();
    assert_eq!(received.as_array().map(Vec::len), Some(1));

    let by_author = server
        .put(&format!("/api/player-offers/{}/accept", offer_id))
        .authorization_bearer(&club.token)
        .await;
    assert_eq!(by_author.status_code(), StatusCode::FORBIDDEN);

    let accepted = server
        .put(&format!("/api/player-offers/{}/accept", offer_id))
        .authorization_bearer(&player.token)
        .await;
    assert_eq!(accepted.status_code(), StatusCode::OK);
    assert_eq!(accepted.json::<Value>()["status"], "accepted");

    let again = server
        .put(&format!("/api/player-offers/{}/reject", offer_id))
        .authorization_bearer(&player.token)
        .await;
    assert_eq!(again.status_code(), StatusCode::CONFLICT);

    let withdraw = server
        .delete(&format!("/api/player-offers/{}", offer_id))
        .authorization_bearer(&club.token)
        .await;
    assert_eq!(withdraw.status_code(), StatusCode::CONFLICT);

    let export = server
        .get("/api/users/me/export/offers.csv")
        .authorization_bearer(&player.token)
        .await;
    assert_eq!(export.status_code(), StatusCode::OK);
    assert_eq!(export.header(header::CONTENT_TYPE), "text/csv; charset=utf-8");
    let csv = export.text();
    assert_eq!(csv.matches("\r\n").count(), 2);
    crate::assert_contains!(csv, ",Harbour FC,Striker,2000.00,accepted,");
}

#[tokio::test]
#[serial]
async fn test_favorites_are_idempotent() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = server_with_database(db.url()).await;

    let _admin = signup_user(&server, "fav_admin").await;
    let player = signup_user(&server, "fav_player").await;
    let scout = signup_user(&server, "fav_scout").await;
    let ad_id = create_player_advertisement(&server, &player).await;
    let path = format!("/api/favorites/player-advertisements/{}", ad_id);

    for _ in 0..2 {
        let response = server.post(&path).authorization_bearer(&scout.token).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<Value>()["is_favorite"], true);
    }

    let favorites: Value = server
        .get("/api/favorites/player-advertisements")
        .authorization_bearer(&scout.token)
        .await
        .json();
    assert_eq!(favorites.as_array().map(Vec::len), Some(1));

    let exists: Value = server
        .get(&format!("{}/exists", path))
        .authorization_bearer(&scout.token)
        .await
        .json();
    assert_eq!(exists, json!({"exists": true}));

    let own = server.post(&path).authorization_bearer(&player.token).await;
    assert_eq!(own.status_code(), StatusCode::BAD_REQUEST);

    let removed = server.delete(&path).authorization_bearer(&scout.token).await;
    assert_eq!(removed.status_code(), StatusCode::OK);
    let exists: Value = server
        .get(&format!("{}/exists", path))
        .authorization_bearer(&scout.token)
        .await
        .json();
    assert_eq!(exists["exists"], false);

    let unknown = server
        .post(&format!("/api/favorites/club-advertisements/{}", uuid::Uuid::new_v4()))
        .authorization_bearer(&scout.token)
        .await;
    assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn test_problems_and_administration() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = server_with_database(db.url()).await;

    let admin = signup_user(&server, "desk_admin").await;
    let user = signup_user(&server, "desk_user").await;

    let created = server
        .post("/api/problems")
        .authorization_bearer(&user.token)
        .json(&json!({"title": "Upload fails", "description": "The photo upload spins forever"}))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let problem_id = created.json::<Value>()["id"].as_str().unwrap().to_string();

    let count: Value = server
        .get("/api/problems/unsolved/count")
        .authorization_bearer(&admin.token)
        .await
        .json();
    assert_eq!(count["count"], 1);

    let forbidden = server.get("/api/problems").authorization_bearer(&user.token).await;
    assert_eq!(forbidden.status_code(), StatusCode::FORBIDDEN);

    let solved = server
        .put(&format!("/api/problems/{}/solve", problem_id))
        .authorization_bearer(&admin.token)
        .await;
    assert_eq!(solved.json::<Value>()["is_solved"], true);

    let unsolved: Value = server
        .get("/api/problems?solved=false")
        .authorization_bearer(&admin.token)
        .await
        .json();
    assert_eq!(unsolved.as_array().map(Vec::len), Some(0));

    let stats: Value = server
        .get("/api/admin/stats")
        .authorization_bearer(&admin.token)
        .await
        .json();
    assert_eq!(stats["users"], 2);
    assert_eq!(stats["unsolved_problems"], 0);

    let users: Value = server
        .get("/api/admin/users?search=desk_u")
        .authorization_bearer(&admin.token)
        .await
        .json();
    assert_eq!(users["total"], 1);

    let self_demote = server
        .put(&format!("/api/admin/users/{}/role", admin.id))
        .authorization_bearer(&admin.token)
        .json(&json!({"role": "user"}))
        .await;
    assert_eq!(self_demote.status_code(), StatusCode::BAD_REQUEST);

    let self_delete = server
        .delete(&format!("/api/admin/users/{}", admin.id))
        .authorization_bearer(&admin.token)
        .await;
    assert_eq!(self_delete.status_code(), StatusCode::BAD_REQUEST);

    let export = server
        .get("/api/admin/export/users.csv")
        .authorization_bearer(&admin.token)
        .await;
    assert_eq!(
        export.header(header::CONTENT_DISPOSITION),
        "attachment; filename=\"users.csv\""
    );
    assert_eq!(export.text().matches("\r\n").count(), 3);

    let deleted = server
        .delete(&format!("/api/admin/users/{}", user.id))
        .authorization_bearer(&admin.token)
        .await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);

    // The deleted user's token no longer authenticates
    let me = server.get("/api/auth/me").authorization_bearer(&user.token).await;
    assert_eq!(me.status_code(), StatusCode::UNAUTHORIZED);
}
