//! Repository for the `categories` table.

use goozinshe_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Category, CategoryInput};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, poster_url";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row.
    pub async fn create(pool: &PgPool, input: &CategoryInput) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (title, poster_url) \
             VALUES ($1, COALESCE($2, '')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.title)
            .bind(&input.poster_url)
            .fetch_one(pool)
            .await
    }

    /// Find a category by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Bulk lookup. Unknown IDs are silently skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = ANY($1) ORDER BY id");
        sqlx::query_as::<_, Category>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List all categories ordered by ID ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY id");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Replace a category's title (and poster, when given).
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &CategoryInput,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET \
                title = $2, \
                poster_url = COALESCE($3, poster_url) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.poster_url)
            .fetch_optional(pool)
            .await
    }

    /// Point the category at a newly stored poster. Returns `true` if the row exists.
    pub async fn set_poster(pool: &PgPool, id: DbId, poster_url: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE categories SET poster_url = $2 WHERE id = $1")
            .bind(id)
            .bind(poster_url)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a category. Fails with a foreign-key violation while movies use it.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
