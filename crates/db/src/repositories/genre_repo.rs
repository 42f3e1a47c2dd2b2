//! Repository for the `genres` table.

use goozinshe_core::types::DbId;
use sqlx::PgPool;

use crate::models::genre::{Genre, GenreInput};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, poster_url";

/// Provides CRUD operations for genres.
pub struct GenreRepo;

impl GenreRepo {
    /// Insert a new genre, returning the created row.
    pub async fn create(pool: &PgPool, input: &GenreInput) -> Result<Genre, sqlx::Error> {
        let query = format!(
            "INSERT INTO genres (title, poster_url) \
             VALUES ($1, COALESCE($2, '')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Genre>(&query)
            .bind(&input.title)
            .bind(&input.poster_url)
            .fetch_one(pool)
            .await
    }

    /// Find a genre by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Genre>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM genres WHERE id = $1");
        sqlx::query_as::<_, Genre>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Bulk lookup. Unknown IDs are silently skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Genre>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM genres WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, Genre>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List all genres ordered by ID ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Genre>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM genres ORDER BY id");
        sqlx::query_as::<_, Genre>(&query).fetch_all(pool).await
    }

    /// Replace a genre's title (and poster, when given).
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &GenreInput,
    ) -> Result<Option<Genre>, sqlx::Error> {
        let query = format!(
            "UPDATE genres SET \
                title = $2, \
                poster_url = COALESCE($3, poster_url) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Genre>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.poster_url)
            .fetch_optional(pool)
            .await
    }

    /// Point the genre at a newly stored poster. Returns `true` if the row exists.
    pub async fn set_poster(pool: &PgPool, id: DbId, poster_url: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE genres SET poster_url = $2 WHERE id = $1")
            .bind(id)
            .bind(poster_url)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a genre. Fails with a foreign-key violation while movies use it.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
