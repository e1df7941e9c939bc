//! Database connection and schema migrations

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

/// Parse the database URL and cap every statement at
/// `statement_timeout_secs` on the server side.
pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions> {
    let options: PgConnectOptions = config.url.parse().context("Invalid DATABASE_URL")?;
    Ok(options.options([(
        "statement_timeout",
        format!("{}s", config.statement_timeout_secs),
    )]))
}

/// Open the shared connection pool. Waiting for a free connection is
/// bounded by `acquire_timeout_secs`.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(connect_options(config)?)
        .await
        .context("Failed to connect to database")?;

    info!("Connected to database");
    Ok(pool)
}

/// Apply the embedded migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running database migrations...");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;

    info!("Database migrations completed");
    Ok(())
}
