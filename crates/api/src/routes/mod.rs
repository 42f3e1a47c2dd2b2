pub mod ages;
pub mod auth;
pub mod categories;
pub mod genres;
pub mod health;
pub mod movies;
pub mod selected;
pub mod series;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/sign-in                          sign in (public)
/// /auth/me                               current user (auth)
/// /auth/me/password                      change own password (auth)
///
/// /movies                                list (auth), create (admin)
/// /movies/{id}                           get (auth), update, delete (admin)
/// /movies/{id}/watched                   set watched flag (auth)
/// /movies/{id}/poster                    upload poster (admin)
///
/// /selected                              featured list (auth)
/// /selected/{movie_id}                   add, remove (admin)
///
/// /genres, /categories, /ages            list (auth), create (admin)
/// /genres/{id}, ...                      get (auth), update, delete (admin)
/// /genres/{id}/poster, ...               upload poster (admin)
///
/// /series                                list (auth), create (admin)
/// /series/{id}                           get (auth), update, delete (admin)
///
/// /users                                 list, create (admin)
/// /users/{id}                            get, update, delete (admin)
/// /users/{id}/password                   set password (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/movies", movies::router())
        .nest("/selected", selected::router())
        .nest("/genres", genres::router())
        .nest("/categories", categories::router())
        .nest("/ages", ages::router())
        .nest("/series", series::router())
        .nest("/users", users::router())
}
