pub mod ages;
pub mod auth;
pub mod categories;
pub mod genres;
pub mod movies;
pub mod poster;
pub mod selected;
pub mod series;
pub mod users;

use goozinshe_core::error::CoreError;

/// Reject blank titles on the title-only catalog entities.
pub(crate) fn require_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".into()));
    }
    Ok(())
}
