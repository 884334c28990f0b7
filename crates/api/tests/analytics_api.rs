//! Integration tests for the employee analytics endpoints and report cache.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth};
use sqlx::PgPool;

const REPORTS: &[&str] = &[
    "/api/v1/analytics/top-series-by-viewers",
    "/api/v1/analytics/top-series-by-rating",
    "/api/v1/analytics/series-per-country",
    "/api/v1/analytics/series-per-genre",
    "/api/v1/analytics/monthly-feedback",
    "/api/v1/analytics/production-houses",
    "/api/v1/analytics/rating-distribution",
    "/api/v1/analytics/top-countries",
    "/api/v1/analytics/series-performance",
    "/api/v1/analytics/user-engagement",
    "/api/v1/analytics/viewer-percentiles",
    "/api/v1/analytics/above-house-average",
    "/api/v1/analytics/unrated-series",
];

/// One house, one series with a single 500-viewer episode.
async fn seed(pool: &PgPool) -> (axum::Router, String, i64) {
    let (_, token) = common::employee_token(pool, "analyst").await;
    let app = common::build_test_app(pool.clone());
    let house = common::create_house(app.clone(), &token, "Metrics Media").await;
    let series = common::create_series(app.clone(), &token, "Counted", house).await;

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/admin/series/{series}/episodes"),
        &token,
        serde_json::json!({ "name": "Pilot", "total_viewers": 500 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    (app, token, series)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn every_report_returns_an_array(pool: PgPool) {
    let (app, token, _) = seed(&pool).await;

    for uri in REPORTS {
        let response = get_auth(app.clone(), uri, &token).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert!(body_json(response).await.is_array(), "{uri}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn customers_cannot_read_reports(pool: PgPool) {
    let (_, token) = common::customer_token(&pool, "curious").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/analytics/unrated-series", &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rating_distribution_always_has_five_buckets(pool: PgPool) {
    let (_, viewer) = common::customer_token(&pool, "rater").await;
    let (app, token, series) = seed(&pool).await;
    put_json_auth(
        app.clone(),
        &format!("/api/v1/series/{series}/feedback"),
        &viewer,
        serde_json::json!({ "rating": 4 }),
    )
    .await;

    let json = body_json(
        get_auth(app, "/api/v1/analytics/rating-distribution", &token).await,
    )
    .await;

    let buckets = json.as_array().unwrap();
    assert_eq!(buckets.len(), 5);
    assert_eq!(buckets[3]["rating"], 4);
    assert_eq!(buckets[3]["count"], 1);
    assert_eq!(buckets[0]["count"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cached_report_is_stale_until_cleared(pool: PgPool) {
    let (app, token, series) = seed(&pool).await;
    let uri = "/api/v1/analytics/top-series-by-viewers";

    let first = body_json(get_auth(app.clone(), uri, &token).await).await;
    assert_eq!(first[0]["total_viewers"], 500);

    // A write through the admin API leaves the cached report untouched.
    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/admin/series/{series}/episodes"),
        &token,
        serde_json::json!({ "name": "Finale", "total_viewers": 250 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let second = body_json(get_auth(app.clone(), uri, &token).await).await;
    assert_eq!(second[0]["total_viewers"], 500);

    let stats = body_json(get_auth(app.clone(), "/api/v1/analytics/cache-stats", &token).await).await;
    assert_eq!(stats["enabled"], true);
    assert!(stats["keys"]
        .as_array()
        .unwrap()
        .iter()
        .any(|k| k == "top_series_by_viewers:10"));

    let response = delete_auth(app.clone(), "/api/v1/analytics/cache", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["removed"], 1);

    let third = body_json(get_auth(app, uri, &token).await).await;
    assert_eq!(third[0]["total_viewers"], 750);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn single_key_invalidation(pool: PgPool) {
    let (app, token, _) = seed(&pool).await;
    get_auth(app.clone(), "/api/v1/analytics/unrated-series", &token).await;

    let response = delete_auth(app.clone(), "/api/v1/analytics/cache/unrated_series", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["removed"], 1);

    let response = delete_auth(app, "/api/v1/analytics/cache/unrated_series", &token).await;
    assert_eq!(body_json(response).await["removed"], 0);
}
