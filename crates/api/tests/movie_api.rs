//! HTTP-level integration tests for `/movies`.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, build_test_app, delete, get, patch, post_json, post_multipart,
    put_json, user_token,
};
use goozinshe_core::types::DbId;
use goozinshe_db::models::age_rating::AgeRatingInput;
use goozinshe_db::models::category::CategoryInput;
use goozinshe_db::models::genre::GenreInput;
use goozinshe_db::repositories::{AgeRatingRepo, CategoryRepo, GenreRepo};
use serde_json::{json, Value};
use sqlx::PgPool;

/// Ids of one genre pair, one category and one age rating.
struct Lookups {
    drama: DbId,
    comedy: DbId,
    category: DbId,
    age: DbId,
}

async fn seed_lookups(pool: &PgPool) -> Lookups {
    let genre = |title: &str| GenreInput {
        title: title.to_string(),
        poster_url: None,
    };
    let drama = GenreRepo::create(pool, &genre("Drama")).await.unwrap();
    let comedy = GenreRepo::create(pool, &genre("Comedy")).await.unwrap();
    let category = CategoryRepo::create(
        pool,
        &CategoryInput {
            title: "Feature".to_string(),
            poster_url: None,
        },
    )
    .await
    .unwrap();
    let age = AgeRatingRepo::create(
        pool,
        &AgeRatingInput {
            title: "12+".to_string(),
            poster_url: None,
        },
    )
    .await
    .unwrap();

    Lookups {
        drama: drama.id,
        comedy: comedy.id,
        category: category.id,
        age: age.id,
    }
}

fn movie_body(title: &str, genre_ids: &[DbId], lookups: &Lookups) -> Value {
    json!({
        "title": title,
        "description": "A film",
        "release_year": 2001,
        "director": "Someone",
        "rating": 7,
        "genre_ids": genre_ids,
        "category_ids": [lookups.category],
        "age_ids": [lookups.age],
    })
}

async fn create_movie(pool: &PgPool, token: &str, body: Value) -> Value {
    let response = post_json(build_test_app(pool.clone()), "/api/v1/movies", Some(token), body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

fn titles(json: &Value) -> Vec<String> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Access control
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn user_can_read_but_not_write(pool: PgPool) {
    let lookups = seed_lookups(&pool).await;
    let token = user_token(&pool).await;

    let response = get(build_test_app(pool.clone()), "/api/v1/movies", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], json!([]));

    let body = movie_body("Blocked", &[lookups.drama], &lookups);
    let response = post_json(build_test_app(pool), "/api/v1/movies", Some(&token), body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_nested_aggregate(pool: PgPool) {
    let lookups = seed_lookups(&pool).await;
    let token = admin_token(&pool).await;

    let movie = create_movie(
        &pool,
        &token,
        movie_body("Alpha", &[lookups.drama, lookups.comedy, lookups.drama], &lookups),
    )
    .await;

    assert_eq!(movie["title"], "Alpha");
    assert_eq!(movie["poster_url"], "");
    assert_eq!(movie["genres"].as_array().unwrap().len(), 2);
    assert_eq!(movie["categories"][0]["title"], "Feature");
    assert_eq!(movie["ages"][0]["title"], "12+");
    assert_eq!(movie["series"], json!([]));

    let uri = format!("/api/v1/movies/{}", movie["id"]);
    let response = get(build_test_app(pool), &uri, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], movie);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_unknown_movie_is_404(pool: PgPool) {
    let token = user_token(&pool).await;
    let response = get(build_test_app(pool), "/api/v1/movies/999999", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_without_genres_is_validation_error(pool: PgPool) {
    let lookups = seed_lookups(&pool).await;
    let token = admin_token(&pool).await;

    let body = movie_body("Orphan", &[], &lookups);
    let response = post_json(build_test_app(pool.clone()), "/api/v1/movies", Some(&token), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = get(build_test_app(pool), "/api/v1/movies", Some(&token)).await;
    assert_eq!(body_json(response).await["data"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_unknown_genre_is_constraint_violation(pool: PgPool) {
    let lookups = seed_lookups(&pool).await;
    let token = admin_token(&pool).await;

    let body = movie_body("Ghost genre", &[lookups.drama, 424242], &lookups);
    let response = post_json(build_test_app(pool.clone()), "/api/v1/movies", Some(&token), body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONSTRAINT_VIOLATION");

    // The movie row was rolled back with its associations.
    let response = get(build_test_app(pool), "/api/v1/movies", Some(&token)).await;
    assert_eq!(body_json(response).await["data"], json!([]));
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_and_sort(pool: PgPool) {
    let lookups = seed_lookups(&pool).await;
    let token = admin_token(&pool).await;

    let mut body = movie_body("Night Train", &[lookups.drama, lookups.comedy], &lookups);
    body["rating"] = json!(9);
    create_movie(&pool, &token, body).await;
    let mut body = movie_body("Day Off", &[lookups.comedy], &lookups);
    body["rating"] = json!(5);
    create_movie(&pool, &token, body).await;
    let mut body = movie_body("Night Shift", &[lookups.drama], &lookups);
    body["rating"] = json!(6);
    body["is_watched"] = json!(true);
    create_movie(&pool, &token, body).await;

    let app = || build_test_app(pool.clone());

    let json = body_json(get(app(), "/api/v1/movies?search=night", Some(&token)).await).await;
    assert_eq!(titles(&json), vec!["Night Train", "Night Shift"]);

    let uri = format!("/api/v1/movies?genre_id={}", lookups.comedy);
    let json = body_json(get(app(), &uri, Some(&token)).await).await;
    assert_eq!(titles(&json), vec!["Night Train", "Day Off"]);
    // Matching on one genre keeps the movie's full genre list.
    assert_eq!(json["data"][0]["genres"].as_array().unwrap().len(), 2);

    let json = body_json(get(app(), "/api/v1/movies?is_watched=false&sort=-rating", Some(&token)).await).await;
    assert_eq!(titles(&json), vec!["Night Train", "Day Off"]);

    let uri = format!("/api/v1/movies?search=night&genre_id={}&is_watched=true", lookups.drama);
    let json = body_json(get(app(), &uri, Some(&token)).await).await;
    assert_eq!(titles(&json), vec!["Night Shift"]);

    // Empty values are ignored.
    let json = body_json(get(app(), "/api/v1/movies?search=&genre_id=&sort=", Some(&token)).await).await;
    assert_eq!(titles(&json).len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_filters_are_rejected(pool: PgPool) {
    let token = user_token(&pool).await;
    let app = || build_test_app(pool.clone());

    for uri in [
        "/api/v1/movies?sort=password_hash",
        "/api/v1/movies?sort=title%3B%20DROP%20TABLE%20movies",
        "/api/v1/movies?is_watched=maybe",
        "/api/v1/movies?genre_id=drama",
    ] {
        let response = get(app(), uri, Some(&token)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

// ---------------------------------------------------------------------------
// Update / delete / watched
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_replaces_associations(pool: PgPool) {
    let lookups = seed_lookups(&pool).await;
    let token = admin_token(&pool).await;
    let movie = create_movie(&pool, &token, movie_body("Before", &[lookups.drama], &lookups)).await;
    let uri = format!("/api/v1/movies/{}", movie["id"]);

    let body = movie_body("After", &[lookups.comedy], &lookups);
    let response = put_json(build_test_app(pool.clone()), &uri, &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await["data"].clone();
    assert_eq!(updated["title"], "After");
    assert_eq!(updated["genres"].as_array().unwrap().len(), 1);
    assert_eq!(updated["genres"][0]["title"], "Comedy");

    let body = movie_body("Nobody", &[lookups.comedy], &lookups);
    let response = put_json(build_test_app(pool), "/api/v1/movies/999999", &token, body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_then_get_is_404(pool: PgPool) {
    let lookups = seed_lookups(&pool).await;
    let token = admin_token(&pool).await;
    let movie = create_movie(&pool, &token, movie_body("Doomed", &[lookups.drama], &lookups)).await;
    let uri = format!("/api/v1/movies/{}", movie["id"]);

    let response = delete(build_test_app(pool.clone()), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool.clone()), &uri, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(build_test_app(pool), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn any_user_can_set_watched(pool: PgPool) {
    let lookups = seed_lookups(&pool).await;
    let admin = admin_token(&pool).await;
    let viewer = user_token(&pool).await;
    let movie = create_movie(&pool, &admin, movie_body("Seen", &[lookups.drama], &lookups)).await;
    let id = movie["id"].as_i64().unwrap();

    let uri = format!("/api/v1/movies/{id}/watched?is_watched=true");
    let response = patch(build_test_app(pool.clone()), &uri, &viewer).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(build_test_app(pool.clone()), &format!("/api/v1/movies/{id}"), Some(&viewer)).await;
    assert_eq!(body_json(response).await["data"]["is_watched"], true);

    let uri = format!("/api/v1/movies/{id}/watched?is_watched=sometimes");
    let response = patch(build_test_app(pool.clone()), &uri, &viewer).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = patch(build_test_app(pool), "/api/v1/movies/999999/watched?is_watched=1", &viewer).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Poster upload
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn poster_upload_is_served_back(pool: PgPool) {
    let lookups = seed_lookups(&pool).await;
    let token = admin_token(&pool).await;
    let movie = create_movie(&pool, &token, movie_body("Posterised", &[lookups.drama], &lookups)).await;
    let uri = format!("/api/v1/movies/{}/poster", movie["id"]);

    let png = b"\x89PNG\r\n\x1a\nnot-really-a-png";
    let response = post_multipart(build_test_app(pool.clone()), &uri, &token, "poster", "cover.PNG", png).await;
    assert_eq!(response.status(), StatusCode::OK);

    let poster_url = body_json(response).await["data"]["poster_url"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(poster_url.starts_with("/images/"));
    assert!(poster_url.ends_with(".png"));

    let response = get(build_test_app(pool), &poster_url, None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn poster_upload_rejects_other_files(pool: PgPool) {
    let lookups = seed_lookups(&pool).await;
    let token = admin_token(&pool).await;
    let movie = create_movie(&pool, &token, movie_body("Plain", &[lookups.drama], &lookups)).await;
    let uri = format!("/api/v1/movies/{}/poster", movie["id"]);

    let response = post_multipart(build_test_app(pool.clone()), &uri, &token, "poster", "notes.txt", b"hello").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_multipart(build_test_app(pool), &uri, &token, "image", "cover.jpg", b"jpeg").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
