//! Repository for the featured list (`selected` table).

use goozinshe_core::types::DbId;
use sqlx::PgPool;

use crate::aggregate::{aggregate_stream, MovieJoinRow, MOVIE_JOIN_COLUMNS, RELATION_JOINS};
use crate::models::movie::Movie;
use crate::models::selected::SelectedEntry;

const COLUMNS: &str = "id, movie_id, added_at";

/// Maintains the featured list: an insertion-ordered set of movies.
pub struct SelectedRepo;

impl SelectedRepo {
    /// Featured movies, fully aggregated, oldest addition first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!(
            "SELECT {MOVIE_JOIN_COLUMNS} \
             FROM selected sl \
             JOIN movies m ON m.id = sl.movie_id \
             {RELATION_JOINS} \
             ORDER BY sl.added_at, sl.id"
        );
        let rows = sqlx::query_as::<_, MovieJoinRow>(&query).fetch(pool);
        aggregate_stream(rows).await
    }

    /// Add a movie to the featured list.
    ///
    /// Returns `None` (and writes nothing) if the movie does not exist.
    /// Re-adding a featured movie returns the existing entry unchanged.
    pub async fn add(pool: &PgPool, movie_id: DbId) -> Result<Option<SelectedEntry>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "INSERT INTO selected (movie_id) \
             SELECT id FROM movies WHERE id = $1 \
             ON CONFLICT (movie_id) DO NOTHING",
        )
        .bind(movie_id)
        .execute(&mut *tx)
        .await?;

        let query = format!("SELECT {COLUMNS} FROM selected WHERE movie_id = $1");
        let entry = sqlx::query_as::<_, SelectedEntry>(&query)
            .bind(movie_id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(entry)
    }

    /// Remove a movie from the featured list, returning the rows removed.
    ///
    /// A non-positive id is a no-op.
    pub async fn remove(pool: &PgPool, movie_id: DbId) -> Result<u64, sqlx::Error> {
        if movie_id <= 0 {
            return Ok(0);
        }
        let result = sqlx::query("DELETE FROM selected WHERE movie_id = $1")
            .bind(movie_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn contains(pool: &PgPool, movie_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM selected WHERE movie_id = $1)")
            .bind(movie_id)
            .fetch_one(pool)
            .await
    }
}
