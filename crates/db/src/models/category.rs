//! Category entity model and DTOs.

use goozinshe_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub title: String,
    pub poster_url: String,
}

/// DTO for creating or replacing a category.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryInput {
    pub title: String,
    pub poster_url: Option<String>,
}
