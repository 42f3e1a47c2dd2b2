//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` DTO for inserts and full-replace updates

pub mod age_rating;
pub mod category;
pub mod genre;
pub mod movie;
pub mod role;
pub mod selected;
pub mod series;
pub mod user;
