//! Public catalogue, reference lists, viewer feedback and the account page.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, get_auth, post_json_auth, put_json_auth, send,
};
use sqlx::PgPool;

struct Catalogue {
    app: axum::Router,
    employee: String,
    drama_id: i64,
    comedy_id: i64,
}

/// Two series: "Crown Court" (Drama) and "Laugh Track" (Comedy, French).
async fn seed_catalogue(pool: PgPool) -> Catalogue {
    let (_, employee) = common::employee_token(&pool, "curator").await;
    let (drama_genre,): (i64,) = sqlx::query_as("SELECT id FROM genres WHERE name = 'Drama'")
        .fetch_one(&pool)
        .await
        .unwrap();
    let (comedy_genre,): (i64,) = sqlx::query_as("SELECT id FROM genres WHERE name = 'Comedy'")
        .fetch_one(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let house = common::create_house(app.clone(), &employee, "Northern Lights").await;

    let drama = serde_json::json!({
        "name": "Crown Court",
        "num_episodes": 10,
        "language": "English",
        "release_date": "2023-05-01",
        "country_of_origin": "United Kingdom",
        "production_house_id": house,
        "genre_ids": [drama_genre],
    });
    let response = post_json_auth(app.clone(), "/api/v1/admin/series", &employee, drama).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let drama_id = body_json(response).await["id"].as_i64().unwrap();

    let comedy = serde_json::json!({
        "name": "Laugh Track",
        "num_episodes": 4,
        "language": "French",
        "release_date": "2024-02-10",
        "country_of_origin": "France",
        "production_house_id": house,
        "genre_ids": [comedy_genre],
    });
    let response = post_json_auth(app.clone(), "/api/v1/admin/series", &employee, comedy).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let comedy_id = body_json(response).await["id"].as_i64().unwrap();

    Catalogue {
        app,
        employee,
        drama_id,
        comedy_id,
    }
}

// ---------------------------------------------------------------------------
// Browse and detail
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn browse_lists_series_with_facets(pool: PgPool) {
    let c = seed_catalogue(pool).await;

    let response = get(c.app, "/api/v1/series").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total"], 2);
    assert_eq!(json["page"], 1);
    assert_eq!(json["page_size"], 10);
    assert_eq!(json["total_pages"], 1);
    assert_eq!(json["items"].as_array().unwrap().len(), 2);
    let languages = json["facets"]["languages"].as_array().unwrap();
    assert!(languages.contains(&"French".into()));
    assert!(languages.contains(&"English".into()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn browse_filters_by_language_and_search(pool: PgPool) {
    let c = seed_catalogue(pool).await;

    let json = body_json(get(c.app.clone(), "/api/v1/series?language=French").await).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["items"][0]["name"], "Laugh Track");

    let json = body_json(get(c.app.clone(), "/api/v1/series?q=crown").await).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["items"][0]["id"], c.drama_id);

    let json = body_json(get(c.app, "/api/v1/series?q=%25").await).await;
    assert_eq!(json["total"], 0, "a literal % must not match everything");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn browse_past_last_page_is_empty(pool: PgPool) {
    let c = seed_catalogue(pool).await;

    let json = body_json(get(c.app, "/api/v1/series?page=5").await).await;

    assert_eq!(json["total"], 2);
    assert_eq!(json["items"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn browse_with_huge_page_is_empty_not_500(pool: PgPool) {
    let c = seed_catalogue(pool).await;

    let response = get(c.app, "/api/v1/series?page=9223372036854775807").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total"], 2);
    assert_eq!(json["items"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn detail_includes_genres_and_rating(pool: PgPool) {
    let c = seed_catalogue(pool).await;

    let response = get(c.app, &format!("/api/v1/series/{}", c.drama_id)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["series"]["name"], "Crown Court");
    assert_eq!(json["series"]["production_house_name"], "Northern Lights");
    assert_eq!(json["genres"], serde_json::json!(["Drama"]));
    assert_eq!(json["rating"]["total_ratings"], 0);
    assert!(json["my_feedback"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_series_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/series/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn feedback_upsert_replaces_and_shows_in_detail(pool: PgPool) {
    let (_, viewer) = common::customer_token(&pool, "critic").await;
    let c = seed_catalogue(pool).await;
    let uri = format!("/api/v1/series/{}/feedback", c.drama_id);

    let response = put_json_auth(
        c.app.clone(),
        &uri,
        &viewer,
        serde_json::json!({ "rating": 2, "feedback_text": "slow start" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json_auth(
        c.app.clone(),
        &uri,
        &viewer,
        serde_json::json!({ "rating": 5, "feedback_text": "  it got great  " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["feedback_text"], "it got great");

    let detail = body_json(
        get_auth(
            c.app.clone(),
            &format!("/api/v1/series/{}", c.drama_id),
            &viewer,
        )
        .await,
    )
    .await;
    assert_eq!(detail["rating"]["total_ratings"], 1);
    assert_eq!(detail["rating"]["avg_rating"], 5.0);
    assert_eq!(detail["my_feedback"]["rating"], 5);
    assert_eq!(detail["reviews"].as_array().unwrap().len(), 1);

    // Anonymous viewers see the same page without personal feedback.
    let anonymous = body_json(get(c.app, &format!("/api/v1/series/{}", c.drama_id)).await).await;
    assert!(anonymous["my_feedback"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn feedback_rating_out_of_range_is_400(pool: PgPool) {
    let (_, viewer) = common::customer_token(&pool, "harsh").await;
    let c = seed_catalogue(pool).await;

    let response = put_json_auth(
        c.app,
        &format!("/api/v1/series/{}/feedback", c.comedy_id),
        &viewer,
        serde_json::json!({ "rating": 6 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn feedback_on_missing_series_is_404(pool: PgPool) {
    let (_, viewer) = common::customer_token(&pool, "lost").await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app,
        "/api/v1/series/424242/feedback",
        &viewer,
        serde_json::json!({ "rating": 3 }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn feedback_requires_session_and_can_be_withdrawn(pool: PgPool) {
    let (_, viewer) = common::customer_token(&pool, "fickle").await;
    let c = seed_catalogue(pool).await;
    let uri = format!("/api/v1/series/{}/feedback", c.comedy_id);

    let response = send(
        c.app.clone(),
        axum::http::Method::PUT,
        &uri,
        None,
        Some(serde_json::json!({ "rating": 4 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response =
        put_json_auth(c.app.clone(), &uri, &viewer, serde_json::json!({ "rating": 4 })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete_auth(c.app.clone(), &uri, &viewer).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(c.app, &uri, &viewer).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn account_shows_profile_and_feedback_history(pool: PgPool) {
    let (_, viewer) = common::customer_token(&pool, "historian").await;
    let c = seed_catalogue(pool).await;
    put_json_auth(
        c.app.clone(),
        &format!("/api/v1/series/{}/feedback", c.drama_id),
        &viewer,
        serde_json::json!({ "rating": 4, "feedback_text": "solid" }),
    )
    .await;

    let json = body_json(get_auth(c.app, "/api/v1/account", &viewer).await).await;

    assert_eq!(json["profile"]["email"], "historian@example.com");
    assert_eq!(json["profile"]["country_name"], "United States");
    let history = json["feedback_history"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["web_series_name"], "Crown Court");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn account_update_validates_subscription(pool: PgPool) {
    let (_, viewer) = common::customer_token(&pool, "saver").await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app.clone(),
        "/api/v1/account",
        &viewer,
        serde_json::json!({ "monthly_subscription": "-1.00" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        app,
        "/api/v1/account",
        &viewer,
        serde_json::json!({ "city": "Shelbyville", "monthly_subscription": "15.50" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["profile"]["city"], "Shelbyville");
    assert_eq!(json["profile"]["monthly_subscription"], "15.50");
}

// ---------------------------------------------------------------------------
// Reference lists
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn reference_lists_are_public_and_kind_is_checked(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/reference/genres").await;
    assert_eq!(response.status(), StatusCode::OK);
    let genres = body_json(response).await;
    assert!(genres
        .as_array()
        .unwrap()
        .iter()
        .any(|g| g["name"] == "Drama"));

    let response = get(app, "/api/v1/reference/planets").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn employee_manages_reference_entries(pool: PgPool) {
    let c = seed_catalogue(pool).await;

    let response = post_json_auth(
        c.app.clone(),
        "/api/v1/admin/reference/genres",
        &c.employee,
        serde_json::json!({ "name": "Mockumentary" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = delete_auth(
        c.app.clone(),
        &format!("/api/v1/admin/reference/genres/{id}"),
        &c.employee,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Drama is linked to "Crown Court" and cannot be removed.
    let genres = body_json(get(c.app.clone(), "/api/v1/reference/genres").await).await;
    let drama_id = genres
        .as_array()
        .unwrap()
        .iter()
        .find(|g| g["name"] == "Drama")
        .unwrap()["id"]
        .as_i64()
        .unwrap();
    let response = delete_auth(
        c.app,
        &format!("/api/v1/admin/reference/genres/{drama_id}"),
        &c.employee,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
