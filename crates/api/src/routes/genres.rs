use axum::routing::{get, post};
use axum::Router;

use crate::handlers::genres;
use crate::state::AppState;

/// Routes mounted at `/genres`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update
/// DELETE /{id}          -> delete
/// POST   /{id}/poster   -> upload_poster
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(genres::list).post(genres::create))
        .route(
            "/{id}",
            get(genres::get_by_id)
                .put(genres::update)
                .delete(genres::delete),
        )
        .route("/{id}/poster", post(genres::upload_poster))
}
