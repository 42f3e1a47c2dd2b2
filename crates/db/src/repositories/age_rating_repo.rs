//! Repository for the `ages` table (age ratings such as "12+").

use goozinshe_core::types::DbId;
use sqlx::PgPool;

use crate::models::age_rating::{AgeRating, AgeRatingInput};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, poster_url";

/// Provides CRUD operations for ages.
pub struct AgeRatingRepo;

impl AgeRatingRepo {
    /// Insert a new age rating, returning the created row.
    pub async fn create(pool: &PgPool, input: &AgeRatingInput) -> Result<AgeRating, sqlx::Error> {
        let query = format!(
            "INSERT INTO ages (title, poster_url) \
             VALUES ($1, COALESCE($2, '')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AgeRating>(&query)
            .bind(&input.title)
            .bind(&input.poster_url)
            .fetch_one(pool)
            .await
    }

    /// Find an age rating by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AgeRating>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ages WHERE id = $1");
        sqlx::query_as::<_, AgeRating>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Bulk lookup. Unknown IDs are silently skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<AgeRating>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ages WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, AgeRating>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List all age ratings ordered by ID ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<AgeRating>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ages ORDER BY id");
        sqlx::query_as::<_, AgeRating>(&query).fetch_all(pool).await
    }

    /// Replace an age rating's title (and poster, when given).
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &AgeRatingInput,
    ) -> Result<Option<AgeRating>, sqlx::Error> {
        let query = format!(
            "UPDATE ages SET \
                title = $2, \
                poster_url = COALESCE($3, poster_url) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AgeRating>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.poster_url)
            .fetch_optional(pool)
            .await
    }

    /// Point the age rating at a newly stored poster. Returns `true` if the row exists.
    pub async fn set_poster(pool: &PgPool, id: DbId, poster_url: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE ages SET poster_url = $2 WHERE id = $1")
            .bind(id)
            .bind(poster_url)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an age rating. Fails with a foreign-key violation while movies use it.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
