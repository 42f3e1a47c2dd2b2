use axum::routing::{get, post};
use axum::Router;

use crate::handlers::selected;
use crate::state::AppState;

/// Routes mounted at `/selected`.
///
/// ```text
/// GET    /               -> list
/// POST   /{movie_id}     -> add
/// DELETE /{movie_id}     -> remove
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(selected::list))
        .route("/{movie_id}", post(selected::add).delete(selected::remove))
}
