//! Database bootstrap: bounded connect retry, then migrations.

use std::time::Duration;

use anyhow::Context;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::DatabaseConfig;

/// Time a request may wait for a pooled connection
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(15);
/// Bound on a single startup connection attempt
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Pause between startup connection attempts
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Connect to PostgreSQL, retrying up to `connect_attempts` times
pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let options = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT);

    let mut attempt = 1;
    loop {
        let result = tokio::time::timeout(CONNECT_TIMEOUT, options.clone().connect(&config.url))
            .await
            .map_err(anyhow::Error::from)
            .and_then(|r| r.map_err(anyhow::Error::from));

        match result {
            Ok(pool) => {
                tracing::info!(attempt, "Connected to database");
                return Ok(pool);
            }
            Err(e) if attempt < config.connect_attempts => {
                tracing::warn!(
                    attempt,
                    max_attempts = config.connect_attempts,
                    error = %e,
                    "Database connection failed, retrying"
                );
                tokio::time::sleep(RETRY_DELAY).await;
                attempt += 1;
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to connect to database after {} attempts", attempt)
                });
            }
        }
    }
}

/// Apply pending migrations from `database/migrations`
pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("../../../database/migrations")
        .run(pool)
        .await
        .context("failed to run database migrations")?;

    tracing::info!("Migrations completed");
    Ok(())
}
