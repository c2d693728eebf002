//! Database connection management

use sqlx::{Pool, Postgres};
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::utils::errors::EwmError;

pub type DatabasePool = Pool<Postgres>;

/// Create a new database connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool, EwmError> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Some(Duration::from_secs(600)))
        .max_lifetime(Some(Duration::from_secs(1800)))
        .connect(&config.url)
        .await?;

    // Test the connection
    sqlx::query("SELECT 1").execute(&pool).await?;

    tracing::info!("Database connection pool created successfully");
    Ok(pool)
}

/// Create a pool without connecting. Connections are established on first
/// use, which lets routers be constructed before the database is reachable.
pub fn create_pool_lazy(url: &str) -> Result<DatabasePool, EwmError> {
    let pool = sqlx::postgres::PgPoolOptions::new().connect_lazy(url)?;
    Ok(pool)
}

/// Run database migrations for the main service
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), EwmError> {
    tracing::info!("Running database migrations...");

    sqlx::migrate!("./migrations").run(pool).await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// Check database health
pub async fn health_check(pool: &DatabasePool) -> Result<(), EwmError> {
    sqlx::query("SELECT 1").execute(pool).await?;

    Ok(())
}
