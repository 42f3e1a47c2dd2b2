//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod age_rating_repo;
pub mod category_repo;
pub mod genre_repo;
pub mod movie_repo;
pub mod role_repo;
pub mod selected_repo;
pub mod series_repo;
pub mod user_repo;

pub use age_rating_repo::AgeRatingRepo;
pub use category_repo::CategoryRepo;
pub use genre_repo::GenreRepo;
pub use movie_repo::MovieRepo;
pub use role_repo::RoleRepo;
pub use selected_repo::SelectedRepo;
pub use series_repo::SeriesRepo;
pub use user_repo::UserRepo;
