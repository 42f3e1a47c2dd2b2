//! Postgres persistence for the movie catalog.
//!
//! - [`models`] -- row structs and write DTOs.
//! - [`aggregate`] -- rebuilds nested movie aggregates from join rows.
//! - [`repositories`] -- zero-sized repository structs over `&PgPool`.

use sqlx::postgres::PgPoolOptions;

pub mod aggregate;
pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
///
/// `max_connections` bounds concurrent live connections; callers beyond the
/// bound wait for a connection to be released.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending schema migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
