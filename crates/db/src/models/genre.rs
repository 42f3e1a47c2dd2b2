//! Genre entity model and DTOs.

use goozinshe_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `genres` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Genre {
    pub id: DbId,
    pub title: String,
    pub poster_url: String,
}

/// DTO for creating or replacing a genre.
///
/// A `None` poster keeps the stored one on update; posters are normally set
/// through the upload endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GenreInput {
    pub title: String,
    pub poster_url: Option<String>,
}
