//! Domain error type shared by every layer above `core`.

use crate::types::DbId;

/// A domain-level failure, independent of transport.
///
/// The HTTP layer maps each variant onto a status code; repositories never
/// construct these directly, they report absence through `Option`/`bool`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
