//! Rebuilds nested [`Movie`] aggregates from flat join rows.
//!
//! Every movie read path selects [`MOVIE_JOIN_COLUMNS`] over
//! [`RELATION_JOINS`], which yields one row per combination of
//! (genre, category, age rating, series) for each movie. The aggregator
//! groups those rows by movie id and collapses the fan-out back into
//! de-duplicated lists.
//!
//! Ordering contract: movies appear in the order their first row was seen,
//! and each related list keeps the order in which its ids were first seen.
//! Nothing is sorted here; SQL `ORDER BY` alone decides the row order.

use std::collections::{HashMap, HashSet};

use futures::{Stream, TryStreamExt};
use goozinshe_core::types::DbId;
use sqlx::FromRow;

use crate::models::age_rating::AgeRating;
use crate::models::category::Category;
use crate::models::genre::Genre;
use crate::models::movie::Movie;
use crate::models::series::Series;

/// Select list matching [`MovieJoinRow`]. The movie table must be aliased `m`.
pub const MOVIE_JOIN_COLUMNS: &str = "\
    m.id AS movie_id, m.title AS movie_title, m.description AS movie_description, \
    m.release_year AS movie_release_year, m.director AS movie_director, \
    m.rating AS movie_rating, m.is_watched AS movie_is_watched, \
    m.trailer_url AS movie_trailer_url, m.poster_url AS movie_poster_url, \
    g.id AS genre_id, g.title AS genre_title, g.poster_url AS genre_poster_url, \
    c.id AS category_id, c.title AS category_title, c.poster_url AS category_poster_url, \
    a.id AS age_id, a.title AS age_title, a.poster_url AS age_poster_url, \
    s.id AS series_id, s.series_number AS series_number, s.title AS series_title, \
    s.description AS series_description, s.release_year AS series_release_year, \
    s.director AS series_director, s.rating AS series_rating, \
    s.trailer_url AS series_trailer_url";

/// Joins from `movies m` to every related table.
///
/// Genres, categories and ages are inner joins, so a movie lacking any of
/// them produces no rows. Series are left-joined and may be absent.
pub const RELATION_JOINS: &str = "\
    JOIN movies_genres mg ON mg.movie_id = m.id \
    JOIN genres g ON g.id = mg.genre_id \
    JOIN movies_categories mc ON mc.movie_id = m.id \
    JOIN categories c ON c.id = mc.category_id \
    JOIN movies_ages ma ON ma.movie_id = m.id \
    JOIN ages a ON a.id = ma.age_id \
    LEFT JOIN movies_allseries ms ON ms.movie_id = m.id \
    LEFT JOIN allseries s ON s.id = ms.series_id";

/// One decoded row of the movie join.
#[derive(Debug, Clone, FromRow)]
pub struct MovieJoinRow {
    pub movie_id: DbId,
    pub movie_title: String,
    pub movie_description: String,
    pub movie_release_year: i32,
    pub movie_director: String,
    pub movie_rating: i32,
    pub movie_is_watched: bool,
    pub movie_trailer_url: String,
    pub movie_poster_url: String,

    pub genre_id: DbId,
    pub genre_title: String,
    pub genre_poster_url: String,

    pub category_id: DbId,
    pub category_title: String,
    pub category_poster_url: String,

    pub age_id: DbId,
    pub age_title: String,
    pub age_poster_url: String,

    // Left-joined: all NULL when the movie has no series.
    pub series_id: Option<DbId>,
    pub series_number: Option<i32>,
    pub series_title: Option<String>,
    pub series_description: Option<String>,
    pub series_release_year: Option<i32>,
    pub series_director: Option<String>,
    pub series_rating: Option<i32>,
    pub series_trailer_url: Option<String>,
}

/// A join row split into its entities.
struct RowParts {
    movie: Movie,
    genre: Genre,
    category: Category,
    age: AgeRating,
    series: Option<Series>,
}

impl MovieJoinRow {
    fn into_parts(self) -> RowParts {
        let series = self.series_id.map(|id| Series {
            id,
            series_number: self.series_number,
            title: self.series_title,
            description: self.series_description,
            release_year: self.series_release_year,
            director: self.series_director,
            rating: self.series_rating,
            trailer_url: self.series_trailer_url,
        });

        RowParts {
            movie: Movie {
                id: self.movie_id,
                title: self.movie_title,
                description: self.movie_description,
                release_year: self.movie_release_year,
                director: self.movie_director,
                rating: self.movie_rating,
                is_watched: self.movie_is_watched,
                trailer_url: self.movie_trailer_url,
                poster_url: self.movie_poster_url,
                genres: Vec::new(),
                categories: Vec::new(),
                ages: Vec::new(),
                series: Vec::new(),
            },
            genre: Genre {
                id: self.genre_id,
                title: self.genre_title,
                poster_url: self.genre_poster_url,
            },
            category: Category {
                id: self.category_id,
                title: self.category_title,
                poster_url: self.category_poster_url,
            },
            age: AgeRating {
                id: self.age_id,
                title: self.age_title,
                poster_url: self.age_poster_url,
            },
            series,
        }
    }
}

/// A movie being assembled, with one seen-set per relation kind.
struct PendingMovie {
    movie: Movie,
    genre_ids: HashSet<DbId>,
    category_ids: HashSet<DbId>,
    age_ids: HashSet<DbId>,
    series_ids: HashSet<DbId>,
}

impl PendingMovie {
    fn new(movie: Movie) -> Self {
        Self {
            movie,
            genre_ids: HashSet::new(),
            category_ids: HashSet::new(),
            age_ids: HashSet::new(),
            series_ids: HashSet::new(),
        }
    }

    fn absorb(&mut self, genre: Genre, category: Category, age: AgeRating, series: Option<Series>) {
        if self.genre_ids.insert(genre.id) {
            self.movie.genres.push(genre);
        }
        if self.category_ids.insert(category.id) {
            self.movie.categories.push(category);
        }
        if self.age_ids.insert(age.id) {
            self.movie.ages.push(age);
        }
        if let Some(series) = series {
            if self.series_ids.insert(series.id) {
                self.movie.series.push(series);
            }
        }
    }
}

/// Single-pass grouping of join rows into movie aggregates.
///
/// Scalar movie fields come from the first row seen for each id; later rows
/// only contribute related entities.
#[derive(Default)]
pub struct MovieAggregator {
    index: HashMap<DbId, usize>,
    movies: Vec<PendingMovie>,
}

impl MovieAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: MovieJoinRow) {
        let RowParts {
            movie,
            genre,
            category,
            age,
            series,
        } = row.into_parts();

        let slot = match self.index.get(&movie.id) {
            Some(&slot) => slot,
            None => {
                self.index.insert(movie.id, self.movies.len());
                self.movies.push(PendingMovie::new(movie));
                self.movies.len() - 1
            }
        };
        self.movies[slot].absorb(genre, category, age, series);
    }

    /// Number of distinct movies seen so far.
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn finish(self) -> Vec<Movie> {
        self.movies.into_iter().map(|pending| pending.movie).collect()
    }
}

/// Aggregate an in-memory row list.
pub fn aggregate(rows: impl IntoIterator<Item = MovieJoinRow>) -> Vec<Movie> {
    let mut aggregator = MovieAggregator::new();
    for row in rows {
        aggregator.push(row);
    }
    aggregator.finish()
}

/// Aggregate a fallible row stream, such as `sqlx::query_as(..).fetch(pool)`.
///
/// The first error aborts the pass and everything aggregated so far is
/// dropped.
pub async fn aggregate_stream<S, E>(mut rows: S) -> Result<Vec<Movie>, E>
where
    S: Stream<Item = Result<MovieJoinRow, E>> + Unpin,
{
    let mut aggregator = MovieAggregator::new();
    let mut row_count = 0usize;
    while let Some(row) = rows.try_next().await? {
        aggregator.push(row);
        row_count += 1;
    }
    tracing::debug!(rows = row_count, movies = aggregator.len(), "Join rows aggregated");
    Ok(aggregator.finish())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use futures::stream;

    use super::*;

    fn row(movie: DbId, genre: DbId, category: DbId, age: DbId, series: Option<DbId>) -> MovieJoinRow {
        MovieJoinRow {
            movie_id: movie,
            movie_title: format!("Movie {movie}"),
            movie_description: String::new(),
            movie_release_year: 2000,
            movie_director: "Director".into(),
            movie_rating: 7,
            movie_is_watched: false,
            movie_trailer_url: String::new(),
            movie_poster_url: String::new(),
            genre_id: genre,
            genre_title: format!("Genre {genre}"),
            genre_poster_url: String::new(),
            category_id: category,
            category_title: format!("Category {category}"),
            category_poster_url: String::new(),
            age_id: age,
            age_title: format!("{age}+"),
            age_poster_url: String::new(),
            series_id: series,
            series_number: series.map(|_| 1),
            series_title: series.map(|id| format!("Series {id}")),
            series_description: None,
            series_release_year: None,
            series_director: None,
            series_rating: None,
            series_trailer_url: None,
        }
    }

    fn ids<T>(items: &[T], id: impl Fn(&T) -> DbId) -> Vec<DbId> {
        items.iter().map(id).collect()
    }

    #[test]
    fn collapses_fan_out_into_one_movie() {
        let movies = aggregate(vec![
            row(1, 10, 20, 30, None),
            row(1, 11, 20, 30, None),
            row(1, 10, 20, 30, Some(40)),
        ]);

        assert_eq!(movies.len(), 1);
        let movie = &movies[0];
        assert_eq!(movie.id, 1);
        assert_eq!(ids(&movie.genres, |g| g.id), vec![10, 11]);
        assert_eq!(ids(&movie.categories, |c| c.id), vec![20]);
        assert_eq!(ids(&movie.ages, |a| a.id), vec![30]);
        assert_eq!(ids(&movie.series, |s| s.id), vec![40]);
    }

    #[test]
    fn related_lists_keep_first_seen_order() {
        let movies = aggregate(vec![
            row(1, 12, 22, 30, Some(41)),
            row(1, 10, 21, 31, Some(40)),
            row(1, 12, 20, 30, Some(41)),
            row(1, 11, 22, 31, Some(40)),
        ]);

        let movie = &movies[0];
        assert_eq!(ids(&movie.genres, |g| g.id), vec![12, 10, 11]);
        assert_eq!(ids(&movie.categories, |c| c.id), vec![22, 21, 20]);
        assert_eq!(ids(&movie.ages, |a| a.id), vec![30, 31]);
        assert_eq!(ids(&movie.series, |s| s.id), vec![41, 40]);
    }

    #[test]
    fn movies_keep_first_seen_order_when_interleaved() {
        let movies = aggregate(vec![
            row(3, 10, 20, 30, None),
            row(1, 10, 20, 30, None),
            row(3, 11, 20, 30, None),
            row(2, 10, 20, 30, None),
            row(1, 12, 20, 30, None),
        ]);

        assert_eq!(ids(&movies, |m| m.id), vec![3, 1, 2]);
        assert_eq!(ids(&movies[0].genres, |g| g.id), vec![10, 11]);
        assert_eq!(ids(&movies[1].genres, |g| g.id), vec![10, 12]);
    }

    #[test]
    fn null_series_adds_nothing() {
        let movies = aggregate(vec![row(1, 10, 20, 30, None), row(1, 11, 20, 30, None)]);
        assert!(movies[0].series.is_empty());
    }

    #[test]
    fn shared_series_is_attached_to_every_movie() {
        let movies = aggregate(vec![
            row(1, 10, 20, 30, Some(40)),
            row(2, 10, 20, 30, Some(40)),
            row(2, 11, 20, 30, Some(40)),
        ]);

        assert_eq!(ids(&movies[0].series, |s| s.id), vec![40]);
        assert_eq!(ids(&movies[1].series, |s| s.id), vec![40]);
    }

    #[test]
    fn scalar_fields_come_from_first_row() {
        let mut second = row(1, 11, 20, 30, None);
        second.movie_title = "Renamed".into();

        let movies = aggregate(vec![row(1, 10, 20, 30, None), second]);
        assert_eq!(movies[0].title, "Movie 1");
    }

    #[test]
    fn empty_input_yields_no_movies() {
        assert!(aggregate(Vec::new()).is_empty());
        assert!(MovieAggregator::new().is_empty());
    }

    #[test]
    fn aggregator_counts_distinct_movies() {
        let mut aggregator = MovieAggregator::new();
        aggregator.push(row(1, 10, 20, 30, None));
        aggregator.push(row(1, 11, 20, 30, None));
        aggregator.push(row(2, 10, 20, 30, None));
        assert_eq!(aggregator.len(), 2);
    }

    #[tokio::test]
    async fn stream_aggregates_all_rows() {
        let rows = stream::iter(vec![
            Ok::<_, sqlx::Error>(row(1, 10, 20, 30, None)),
            Ok(row(1, 11, 20, 30, Some(40))),
            Ok(row(2, 10, 20, 30, None)),
        ]);

        let movies = aggregate_stream(rows).await.unwrap();
        assert_eq!(ids(&movies, |m| m.id), vec![1, 2]);
        assert_eq!(ids(&movies[0].genres, |g| g.id), vec![10, 11]);
    }

    #[tokio::test]
    async fn decode_error_discards_partial_result() {
        let rows = stream::iter(vec![
            Ok(row(1, 10, 20, 30, None)),
            Err(sqlx::Error::ColumnNotFound("genre_title".into())),
            Ok(row(2, 10, 20, 30, None)),
        ]);

        assert_matches!(
            aggregate_stream(rows).await,
            Err(sqlx::Error::ColumnNotFound(col)) if col == "genre_title"
        );
    }
}
