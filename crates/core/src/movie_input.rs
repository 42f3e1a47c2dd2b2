//! Validation of movie write input (create / full-replace update).

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

/// De-duplicate ids, keeping the first occurrence of each.
pub fn dedup_ids(ids: &[DbId]) -> Vec<DbId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Association id lists for one movie, after de-duplication.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MovieAssociations {
    pub genre_ids: Vec<DbId>,
    pub category_ids: Vec<DbId>,
    pub age_rating_ids: Vec<DbId>,
    pub series_ids: Vec<DbId>,
}

impl MovieAssociations {
    /// Normalise and validate raw association ids.
    ///
    /// Genres, categories and age ratings are each required: the read paths
    /// inner-join all three, so a movie missing any of them could never be
    /// read back. Series are optional.
    pub fn new(
        genre_ids: &[DbId],
        category_ids: &[DbId],
        age_rating_ids: &[DbId],
        series_ids: &[DbId],
    ) -> Result<Self, CoreError> {
        let associations = MovieAssociations {
            genre_ids: dedup_ids(genre_ids),
            category_ids: dedup_ids(category_ids),
            age_rating_ids: dedup_ids(age_rating_ids),
            series_ids: dedup_ids(series_ids),
        };

        require_non_empty("genre", &associations.genre_ids)?;
        require_non_empty("category", &associations.category_ids)?;
        require_non_empty("age rating", &associations.age_rating_ids)?;

        for id in associations
            .genre_ids
            .iter()
            .chain(&associations.category_ids)
            .chain(&associations.age_rating_ids)
            .chain(&associations.series_ids)
        {
            if *id <= 0 {
                return Err(CoreError::Validation(format!(
                    "Association ids must be positive, got {id}"
                )));
            }
        }

        Ok(associations)
    }
}

/// Validate the scalar fields of a movie.
pub fn validate_movie_fields(title: &str, release_year: i32, rating: i32) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Movie title must not be empty".into()));
    }
    if release_year < 0 {
        return Err(CoreError::Validation(format!(
            "Release year must not be negative, got {release_year}"
        )));
    }
    if rating < 0 {
        return Err(CoreError::Validation(format!(
            "Rating must not be negative, got {rating}"
        )));
    }
    Ok(())
}

fn require_non_empty(kind: &str, ids: &[DbId]) -> Result<(), CoreError> {
    if ids.is_empty() {
        return Err(CoreError::Validation(format!(
            "A movie needs at least one {kind}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        assert_eq!(dedup_ids(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
        assert!(dedup_ids(&[]).is_empty());
    }

    #[test]
    fn associations_are_deduplicated() {
        let assoc = MovieAssociations::new(&[1, 1, 2], &[5], &[7, 7], &[]).unwrap();
        assert_eq!(assoc.genre_ids, vec![1, 2]);
        assert_eq!(assoc.age_rating_ids, vec![7]);
        assert!(assoc.series_ids.is_empty());
    }

    #[test]
    fn missing_required_association_is_rejected() {
        assert_matches!(
            MovieAssociations::new(&[], &[1], &[1], &[]),
            Err(CoreError::Validation(msg)) if msg.contains("genre")
        );
        assert_matches!(
            MovieAssociations::new(&[1], &[], &[1], &[]),
            Err(CoreError::Validation(msg)) if msg.contains("category")
        );
        assert_matches!(
            MovieAssociations::new(&[1], &[1], &[], &[9]),
            Err(CoreError::Validation(msg)) if msg.contains("age rating")
        );
    }

    #[test]
    fn non_positive_ids_are_rejected() {
        assert_matches!(
            MovieAssociations::new(&[1], &[1], &[1], &[0]),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn movie_fields() {
        assert!(validate_movie_fields("Alien", 1979, 8).is_ok());
        assert!(validate_movie_fields("  ", 1979, 8).is_err());
        assert!(validate_movie_fields("Alien", -1, 8).is_err());
        assert!(validate_movie_fields("Alien", 1979, -3).is_err());
    }
}
