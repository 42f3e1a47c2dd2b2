//! Handlers for the featured list (`/selected`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use goozinshe_core::error::CoreError;
use goozinshe_core::types::DbId;
use goozinshe_db::models::movie::Movie;
use goozinshe_db::repositories::SelectedRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Payload of `GET /selected`.
#[derive(Debug, Serialize)]
pub struct SelectedMovies {
    pub movies: Vec<Movie>,
}

/// GET /api/v1/selected
///
/// Featured movies in the order they were added.
pub async fn list(State(state): State<AppState>, _user: AuthUser) -> AppResult<impl IntoResponse> {
    let movies = SelectedRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: SelectedMovies { movies },
    }))
}

/// POST /api/v1/selected/{movie_id}
///
/// Idempotent: re-adding returns the original entry.
pub async fn add(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(movie_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let entry = SelectedRepo::add(&state.pool, movie_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Movie",
            id: movie_id,
        }))?;
    tracing::info!(movie_id, "Movie featured");
    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// DELETE /api/v1/selected/{movie_id}
///
/// Removing a movie that is not featured, or id `0`, still succeeds.
pub async fn remove(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(movie_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = SelectedRepo::remove(&state.pool, movie_id).await?;
    tracing::info!(movie_id, removed, "Movie unfeatured");
    Ok(StatusCode::NO_CONTENT)
}
