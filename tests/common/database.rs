//! Database test fixtures
//!
//! Database tests need a PostgreSQL server named by `DATABASE_URL`. When it
//! is not set the fixture returns `None` and the test ends early, so the
//! suite passes on machines without a database.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use scoutlink::backend::server::config::run_migrations;

/// Truncate every table while keeping the schema
pub async fn cleanup_test_data(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "TRUNCATE TABLE chat_messages, chats, problems, favorite_player_advertisements, \
         favorite_club_advertisements, player_offers, club_offers, player_advertisements, \
         club_advertisements, users CASCADE",
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Test database fixture
pub struct TestDatabase {
    pool: PgPool,
    url: String,
}

impl TestDatabase {
    /// Connect, migrate and empty the database, or `None` without `DATABASE_URL`
    pub async fn try_new() -> Option<Self> {
        let url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("DATABASE_URL not set, skipping database test");
                return None;
            }
        };

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await
            .expect("Failed to create test database pool");
        run_migrations(&pool).await.expect("Failed to run migrations");
        cleanup_test_data(&pool).await.expect("Failed to clean test data");

        Some(Self { pool, url })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}
