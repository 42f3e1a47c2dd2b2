use axum::routing::{get, post};
use axum::Router;

use crate::handlers::ages;
use crate::state::AppState;

/// Routes mounted at `/ages`.
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
        .route("/", get(ages::list).post(ages::create))
        .route(
            "/{id}",
            get(ages::get_by_id)
                .put(ages::update)
                .delete(ages::delete),
        )
        .route("/{id}/poster", post(ages::upload_poster))
}
