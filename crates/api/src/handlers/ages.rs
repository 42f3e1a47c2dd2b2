//! Handlers for the `/ages` (age ratings) resource.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use goozinshe_core::error::CoreError;
use goozinshe_core::types::DbId;
use goozinshe_db::models::age_rating::AgeRatingInput;
use goozinshe_db::repositories::AgeRatingRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{poster::store_poster, require_title};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "AgeRating";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// GET /api/v1/ages
pub async fn list(State(state): State<AppState>, _user: AuthUser) -> AppResult<impl IntoResponse> {
    let ages = AgeRatingRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: ages }))
}

/// GET /api/v1/ages/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let age = AgeRatingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: age }))
}

/// POST /api/v1/ages
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<AgeRatingInput>,
) -> AppResult<impl IntoResponse> {
    require_title(&input.title)?;
    let age = AgeRatingRepo::create(&state.pool, &input).await?;
    tracing::info!(age_id = age.id, "Age rating created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: age })))
}

/// PUT /api/v1/ages/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<AgeRatingInput>,
) -> AppResult<impl IntoResponse> {
    require_title(&input.title)?;
    let age = AgeRatingRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: age }))
}

/// DELETE /api/v1/ages/{id}
///
/// A age still referenced by a movie yields 409 `CONSTRAINT_VIOLATION`.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if AgeRatingRepo::delete(&state.pool, id).await? {
        tracing::info!(age_id = id, "Age rating deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/v1/ages/{id}/poster (multipart, field `poster`)
pub async fn upload_poster(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    AgeRatingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let url = store_poster(&state.config.poster_dir, multipart).await?;
    AgeRatingRepo::set_poster(&state.pool, id, &url).await?;

    let age = AgeRatingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: age }))
}
