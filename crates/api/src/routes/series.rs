use axum::routing::get;
use axum::Router;

use crate::handlers::series;
use crate::state::AppState;

/// Routes mounted at `/series`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(series::list).post(series::create))
        .route(
            "/{id}",
            get(series::get_by_id)
                .put(series::update)
                .delete(series::delete),
        )
}
