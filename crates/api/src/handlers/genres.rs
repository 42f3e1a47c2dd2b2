//! Handlers for the `/genres` resource.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use goozinshe_core::error::CoreError;
use goozinshe_core::types::DbId;
use goozinshe_db::models::genre::GenreInput;
use goozinshe_db::repositories::GenreRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{poster::store_poster, require_title};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "Genre";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// GET /api/v1/genres
pub async fn list(State(state): State<AppState>, _user: AuthUser) -> AppResult<impl IntoResponse> {
    let genres = GenreRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: genres }))
}

/// GET /api/v1/genres/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let genre = GenreRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: genre }))
}

/// POST /api/v1/genres
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<GenreInput>,
) -> AppResult<impl IntoResponse> {
    require_title(&input.title)?;
    let genre = GenreRepo::create(&state.pool, &input).await?;
    tracing::info!(genre_id = genre.id, "Genre created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: genre })))
}

/// PUT /api/v1/genres/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<GenreInput>,
) -> AppResult<impl IntoResponse> {
    require_title(&input.title)?;
    let genre = GenreRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: genre }))
}

/// DELETE /api/v1/genres/{id}
///
/// A genre still referenced by a movie yields 409 `CONSTRAINT_VIOLATION`.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if GenreRepo::delete(&state.pool, id).await? {
        tracing::info!(genre_id = id, "Genre deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/v1/genres/{id}/poster (multipart, field `poster`)
pub async fn upload_poster(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    GenreRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let url = store_poster(&state.config.poster_dir, multipart).await?;
    GenreRepo::set_poster(&state.pool, id, &url).await?;

    let genre = GenreRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: genre }))
}
