//! Handlers for the `/movies` resource.
//!
//! Reads need any authenticated user, writes need an admin. Both go through
//! the same [`MovieRepo`].

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use goozinshe_core::error::CoreError;
use goozinshe_core::movie_filter::{parse_bool_flag, MovieFilterParams, MovieFilters};
use goozinshe_core::types::DbId;
use goozinshe_db::models::movie::{Movie, MovieInput};
use goozinshe_db::repositories::MovieRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::poster::store_poster;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query for `PATCH /movies/{id}/watched`.
#[derive(Debug, Deserialize)]
pub struct WatchedParams {
    pub is_watched: String,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Movie", id })
}

/// Reload an aggregate after a write. A movie written by this service always
/// has the associations the read join requires.
async fn reload(state: &AppState, id: DbId) -> AppResult<Movie> {
    MovieRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/movies?search=&genre_id=&is_watched=&sort=
///
/// Filters are validated before any query runs.
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<MovieFilterParams>,
) -> AppResult<impl IntoResponse> {
    let filters = MovieFilters::try_from(params)?;
    let movies = MovieRepo::find_all(&state.pool, &filters).await?;
    Ok(Json(DataResponse { data: movies }))
}

/// GET /api/v1/movies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let movie = MovieRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: movie }))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// POST /api/v1/movies
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<MovieInput>,
) -> AppResult<impl IntoResponse> {
    let associations = input.validate()?;
    let id = MovieRepo::create(&state.pool, &input, &associations).await?;
    tracing::info!(movie_id = id, user_id = admin.user_id, "Movie created");

    let movie = reload(&state, id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: movie })))
}

/// PUT /api/v1/movies/{id}
///
/// Full replace, including every association set.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<MovieInput>,
) -> AppResult<impl IntoResponse> {
    let associations = input.validate()?;
    if !MovieRepo::update(&state.pool, id, &input, &associations).await? {
        return Err(not_found(id));
    }
    tracing::info!(movie_id = id, user_id = admin.user_id, "Movie updated");

    let movie = reload(&state, id).await?;
    Ok(Json(DataResponse { data: movie }))
}

/// DELETE /api/v1/movies/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !MovieRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(movie_id = id, user_id = admin.user_id, "Movie deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/movies/{id}/watched?is_watched=true
pub async fn set_watched(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Query(params): Query<WatchedParams>,
) -> AppResult<StatusCode> {
    let is_watched = parse_bool_flag(&params.is_watched)?;
    if !MovieRepo::set_watched(&state.pool, id, is_watched).await? {
        return Err(not_found(id));
    }
    tracing::debug!(movie_id = id, user_id = user.user_id, is_watched, "Watched flag set");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/movies/{id}/poster (multipart, field `poster`)
pub async fn upload_poster(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    if !MovieRepo::exists(&state.pool, id).await? {
        return Err(not_found(id));
    }
    let url = store_poster(&state.config.poster_dir, multipart).await?;
    if !MovieRepo::set_poster(&state.pool, id, &url).await? {
        return Err(not_found(id));
    }
    tracing::info!(movie_id = id, poster_url = %url, "Movie poster uploaded");

    let movie = reload(&state, id).await?;
    Ok(Json(DataResponse { data: movie }))
}
