//! Postgres access for the registration backend.
//!
//! [`models`] holds row structs and DTOs, [`repositories`] the zero-sized
//! query structs. Migrations under `db/migrations` are embedded at compile
//! time and applied by [`run_migrations`].

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Maximum pooled connections. Every reservation request holds one for the
/// duration of its transaction.
const MAX_CONNECTIONS: u32 = 20;

/// How long a request may wait for a pooled connection.
const ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    tracing::debug!(
        max_connections = MAX_CONNECTIONS,
        acquire_timeout_secs = ACQUIRE_TIMEOUT_SECS,
        "Opening database pool"
    );
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECS))
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
