//! Movie aggregate and write DTO.

use goozinshe_core::error::CoreError;
use goozinshe_core::movie_input::{validate_movie_fields, MovieAssociations};
use goozinshe_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::models::age_rating::AgeRating;
use crate::models::category::Category;
use crate::models::genre::Genre;
use crate::models::series::Series;

/// A movie with its related entities nested in first-seen order.
///
/// Built by [`crate::aggregate::MovieAggregator`] from join rows; never read
/// directly from a single table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub director: String,
    pub rating: i32,
    pub is_watched: bool,
    pub trailer_url: String,
    pub poster_url: String,
    pub genres: Vec<Genre>,
    pub categories: Vec<Category>,
    pub ages: Vec<AgeRating>,
    pub series: Vec<Series>,
}

/// DTO for creating a movie or fully replacing an existing one.
///
/// Association ids replace the stored sets wholesale on update. A `None`
/// poster keeps the stored one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieInput {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub release_year: i32,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub is_watched: bool,
    #[serde(default)]
    pub trailer_url: String,
    pub poster_url: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<DbId>,
    #[serde(default)]
    pub category_ids: Vec<DbId>,
    #[serde(default)]
    pub age_ids: Vec<DbId>,
    #[serde(default)]
    pub series_ids: Vec<DbId>,
}

impl MovieInput {
    /// Check scalar fields and return the normalised association sets.
    pub fn validate(&self) -> Result<MovieAssociations, CoreError> {
        validate_movie_fields(&self.title, self.release_year, self.rating)?;
        MovieAssociations::new(
            &self.genre_ids,
            &self.category_ids,
            &self.age_ids,
            &self.series_ids,
        )
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn input() -> MovieInput {
        MovieInput {
            title: "Alien".into(),
            release_year: 1979,
            rating: 8,
            genre_ids: vec![2, 2, 1],
            category_ids: vec![1],
            age_ids: vec![3],
            ..Default::default()
        }
    }

    #[test]
    fn validate_returns_deduplicated_associations() {
        let assoc = input().validate().unwrap();
        assert_eq!(assoc.genre_ids, vec![2, 1]);
        assert_eq!(assoc.category_ids, vec![1]);
    }

    #[test]
    fn validate_rejects_blank_title() {
        let movie = MovieInput {
            title: " ".into(),
            ..input()
        };
        assert_matches!(movie.validate(), Err(CoreError::Validation(_)));
    }
}
