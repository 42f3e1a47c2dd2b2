//! Handlers for the `/series` resource (`allseries` table).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use goozinshe_core::error::CoreError;
use goozinshe_core::types::DbId;
use goozinshe_db::models::series::SeriesInput;
use goozinshe_db::repositories::SeriesRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Series",
        id,
    })
}

/// GET /api/v1/series
pub async fn list(State(state): State<AppState>, _user: AuthUser) -> AppResult<impl IntoResponse> {
    let series = SeriesRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: series }))
}

/// GET /api/v1/series/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let series = SeriesRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: series }))
}

/// POST /api/v1/series
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<SeriesInput>,
) -> AppResult<impl IntoResponse> {
    let series = SeriesRepo::create(&state.pool, &input).await?;
    tracing::info!(series_id = series.id, "Series created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: series })))
}

/// PUT /api/v1/series/{id}
///
/// Full replace; omitted fields are cleared.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<SeriesInput>,
) -> AppResult<impl IntoResponse> {
    let series = SeriesRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: series }))
}

/// DELETE /api/v1/series/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !SeriesRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(series_id = id, "Series deleted");
    Ok(StatusCode::NO_CONTENT)
}
