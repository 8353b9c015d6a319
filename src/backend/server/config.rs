/**
 * Server Configuration
 *
 * This module opens the optional PostgreSQL connection pool and runs the
 * embedded migrations.
 *
 * # Error Handling
 *
 * Connection errors are logged but do not prevent server startup. The
 * server then runs without a database and storage-backed routes answer
 * 503.
 */

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::shared::AppConfig;

const MAX_CONNECTIONS: u32 = 10;

/// Database configuration result
pub type DatabaseConfig = Option<PgPool>;

/// Load and initialize database connection pool
///
/// This function:
/// 1. Takes `database_url` from the configuration
/// 2. Creates a PostgreSQL connection pool
/// 3. Runs database migrations
///
/// # Returns
///
/// - `Some(PgPool)` if database is successfully configured
/// - `None` if no URL is configured or connection fails
pub async fn load_database(config: &AppConfig) -> DatabaseConfig {
    let database_url = match config.database_url.as_deref() {
        Some(url) => url,
        None => {
            tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    if let Err(e) = run_migrations(&pool).await {
        tracing::error!("Failed to run database migrations: {}", e);
        tracing::warn!("Continuing without migrations - database might not be up to date");
    }

    Some(pool)
}

/// Apply the migrations embedded from `migrations/`
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(pool).await?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}
