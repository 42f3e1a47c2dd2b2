use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::movies;
use crate::state::AppState;

/// Routes mounted at `/movies`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> create
/// GET    /{id}             -> get_by_id
/// PUT    /{id}             -> update
/// DELETE /{id}             -> delete
/// PATCH  /{id}/watched     -> set_watched
/// POST   /{id}/poster      -> upload_poster
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(movies::list).post(movies::create))
        .route(
            "/{id}",
            get(movies::get_by_id)
                .put(movies::update)
                .delete(movies::delete),
        )
        .route("/{id}/watched", patch(movies::set_watched))
        .route("/{id}/poster", post(movies::upload_poster))
}
