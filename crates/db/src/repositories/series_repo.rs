//! Repository for the `allseries` table.

use goozinshe_core::types::DbId;
use sqlx::PgPool;

use crate::models::series::{Series, SeriesInput};

const COLUMNS: &str =
    "id, series_number, title, description, release_year, director, rating, trailer_url";

/// Provides CRUD operations for series.
pub struct SeriesRepo;

impl SeriesRepo {
    /// Insert a new series, returning the created row.
    pub async fn create(pool: &PgPool, input: &SeriesInput) -> Result<Series, sqlx::Error> {
        let query = format!(
            "INSERT INTO allseries \
                (series_number, title, description, release_year, director, rating, trailer_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Series>(&query)
            .bind(input.series_number)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.release_year)
            .bind(&input.director)
            .bind(input.rating)
            .bind(&input.trailer_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Series>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM allseries WHERE id = $1");
        sqlx::query_as::<_, Series>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Bulk lookup. Unknown IDs are silently skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Series>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM allseries WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, Series>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Series>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM allseries ORDER BY id");
        sqlx::query_as::<_, Series>(&query).fetch_all(pool).await
    }

    /// Full replace: fields left `None` in `input` become NULL.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &SeriesInput,
    ) -> Result<Option<Series>, sqlx::Error> {
        let query = format!(
            "UPDATE allseries SET \
                series_number = $2, \
                title = $3, \
                description = $4, \
                release_year = $5, \
                director = $6, \
                rating = $7, \
                trailer_url = $8 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Series>(&query)
            .bind(id)
            .bind(input.series_number)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.release_year)
            .bind(&input.director)
            .bind(input.rating)
            .bind(&input.trailer_url)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM allseries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
