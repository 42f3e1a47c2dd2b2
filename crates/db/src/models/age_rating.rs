//! Age rating entity model and DTOs.

use goozinshe_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `ages` table (e.g. `"12+"`, `"18+"`).
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct AgeRating {
    pub id: DbId,
    pub title: String,
    pub poster_url: String,
}

/// DTO for creating or replacing an age rating.
#[derive(Debug, Clone, Deserialize)]
pub struct AgeRatingInput {
    pub title: String,
    pub poster_url: Option<String>,
}
