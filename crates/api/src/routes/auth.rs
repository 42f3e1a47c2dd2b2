use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /sign-in        -> sign_in
/// GET  /me             -> me
/// PUT  /me/password    -> change_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sign-in", post(auth::sign_in))
        .route("/me", get(auth::me))
        .route("/me/password", put(auth::change_password))
}
