//! Featured-list membership.

use goozinshe_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `selected` table. `added_at` defines list order.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SelectedEntry {
    pub id: DbId,
    pub movie_id: DbId,
    pub added_at: Timestamp,
}
