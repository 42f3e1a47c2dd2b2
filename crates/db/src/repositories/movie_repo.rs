//! Repository for `movies` and its four association tables.
//!
//! Reads go through the movie join and [`crate::aggregate`]; writes keep the
//! scalar row and every association kind consistent inside one transaction.

use goozinshe_core::movie_filter::MovieFilters;
use goozinshe_core::movie_input::MovieAssociations;
use goozinshe_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::aggregate::{aggregate_stream, MovieJoinRow, MOVIE_JOIN_COLUMNS, RELATION_JOINS};
use crate::models::movie::{Movie, MovieInput};

/// `(table, related id column)` for each movie association kind.
const ASSOCIATION_TABLES: [(&str, &str); 4] = [
    ("movies_genres", "genre_id"),
    ("movies_categories", "category_id"),
    ("movies_ages", "age_id"),
    ("movies_allseries", "series_id"),
];

/// Provides aggregate reads and transactional writes for movies.
pub struct MovieRepo;

impl MovieRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Build the filtered, sorted movie join.
    ///
    /// Predicates are appended in a fixed order (title search, genre,
    /// watched flag) and every value is bound. The sort column comes from
    /// the [`goozinshe_core::movie_filter::SortColumn`] allow-list, never from
    /// caller text. `m.id` breaks ties so repeated calls return one order.
    pub fn find_all_query(filters: &MovieFilters) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::<Postgres>::new(format!(
            "SELECT {MOVIE_JOIN_COLUMNS} FROM movies m {RELATION_JOINS} WHERE 1=1"
        ));

        if let Some(pattern) = filters.search_pattern() {
            builder.push(" AND m.title ILIKE ");
            builder.push_bind(pattern);
            builder.push(" ESCAPE '\\'");
        }

        // EXISTS keeps every genre of a matching movie in the result, not
        // only the one filtered on.
        if let Some(genre_id) = filters.genre_id {
            builder.push(
                " AND EXISTS (SELECT 1 FROM movies_genres fg \
                 WHERE fg.movie_id = m.id AND fg.genre_id = ",
            );
            builder.push_bind(genre_id);
            builder.push(")");
        }

        if let Some(is_watched) = filters.is_watched {
            builder.push(" AND m.is_watched = ");
            builder.push_bind(is_watched);
        }

        builder.push(" ORDER BY ");
        if let Some(sort) = filters.sort {
            builder.push(sort.column.sql_column());
            builder.push(" ");
            builder.push(sort.direction.as_sql());
            builder.push(", ");
        }
        builder.push("m.id");

        builder
    }

    /// List movies matching `filters`, fully aggregated.
    pub async fn find_all(pool: &PgPool, filters: &MovieFilters) -> Result<Vec<Movie>, sqlx::Error> {
        let mut builder = Self::find_all_query(filters);
        let rows = builder.build_query_as::<MovieJoinRow>().fetch(pool);
        aggregate_stream(rows).await
    }

    /// Find one aggregated movie.
    ///
    /// Returns `None` when the id is unknown, and also when the movie lacks a
    /// genre, category or age rating (the inner joins yield no rows).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!(
            "SELECT {MOVIE_JOIN_COLUMNS} FROM movies m {RELATION_JOINS} WHERE m.id = $1"
        );
        let rows = sqlx::query_as::<_, MovieJoinRow>(&query).bind(id).fetch(pool);
        Ok(aggregate_stream(rows).await?.into_iter().next())
    }

    /// Whether a `movies` row exists, regardless of its associations.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM movies WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert the movie and all its association rows atomically.
    ///
    /// Any failing insert (typically a foreign-key violation for an unknown
    /// related id) rolls the whole operation back.
    pub async fn create(
        pool: &PgPool,
        input: &MovieInput,
        associations: &MovieAssociations,
    ) -> Result<DbId, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO movies \
                (title, description, release_year, director, rating, is_watched, \
                 trailer_url, poster_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, '')) \
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.release_year)
        .bind(&input.director)
        .bind(input.rating)
        .bind(input.is_watched)
        .bind(&input.trailer_url)
        .bind(&input.poster_url)
        .fetch_one(&mut *tx)
        .await?;

        Self::insert_associations_inner(&mut tx, id, associations).await?;

        tx.commit().await?;
        Ok(id)
    }

    /// Replace the movie's scalar fields and every association set.
    ///
    /// Returns `false` (with nothing written) if no movie has this id.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &MovieInput,
        associations: &MovieAssociations,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query(
            "UPDATE movies SET \
                title = $2, \
                description = $3, \
                release_year = $4, \
                director = $5, \
                rating = $6, \
                is_watched = $7, \
                trailer_url = $8, \
                poster_url = COALESCE($9, poster_url) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.release_year)
        .bind(&input.director)
        .bind(input.rating)
        .bind(input.is_watched)
        .bind(&input.trailer_url)
        .bind(&input.poster_url)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        Self::delete_associations_inner(&mut tx, id).await?;
        Self::insert_associations_inner(&mut tx, id, associations).await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Delete the association rows, then the movie. Featured-list entries go
    /// with it via `ON DELETE CASCADE`.
    ///
    /// Returns `false` if no movie has this id.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        Self::delete_associations_inner(&mut tx, id).await?;
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }

    /// Set the watched flag. Returns `false` if no movie has this id.
    pub async fn set_watched(pool: &PgPool, id: DbId, is_watched: bool) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE movies SET is_watched = $2 WHERE id = $1")
            .bind(id)
            .bind(is_watched)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn set_poster(pool: &PgPool, id: DbId, poster_url: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE movies SET poster_url = $2 WHERE id = $1")
            .bind(id)
            .bind(poster_url)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn insert_associations_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        movie_id: DbId,
        associations: &MovieAssociations,
    ) -> Result<(), sqlx::Error> {
        let id_sets: [&[DbId]; 4] = [
            &associations.genre_ids,
            &associations.category_ids,
            &associations.age_rating_ids,
            &associations.series_ids,
        ];

        for ((table, column), ids) in ASSOCIATION_TABLES.into_iter().zip(id_sets) {
            if ids.is_empty() {
                continue;
            }
            let query = format!(
                "INSERT INTO {table} (movie_id, {column}) SELECT $1, UNNEST($2::BIGINT[])"
            );
            sqlx::query(&query)
                .bind(movie_id)
                .bind(ids)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }

    async fn delete_associations_inner(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        movie_id: DbId,
    ) -> Result<(), sqlx::Error> {
        for (table, _) in ASSOCIATION_TABLES {
            let query = format!("DELETE FROM {table} WHERE movie_id = $1");
            sqlx::query(&query)
                .bind(movie_id)
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }
}
