//! Series (`allseries`) entity model and DTOs.

use goozinshe_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `allseries` table. Every column except `id` is nullable.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Series {
    pub id: DbId,
    pub series_number: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub director: Option<String>,
    pub rating: Option<i32>,
    pub trailer_url: Option<String>,
}

/// DTO for creating or replacing a series. Omitted fields are stored as NULL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeriesInput {
    pub series_number: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub director: Option<String>,
    pub rating: Option<i32>,
    pub trailer_url: Option<String>,
}
