//! HTTP-level integration tests for registration, sessions and password
//! resets.

mod common;

use axum::body::Body;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{Request, StatusCode};
use chrono::Utc;
use common::{body_json, first_id, get, get_auth, post_json, post_json_auth, TEST_PASSWORD};
use sqlx::PgPool;
use streamvault_api::auth::reset_token::{hash_reset_token, reset_token_expiry};
use streamvault_db::models::password_reset::CreatePasswordReset;
use streamvault_db::repositories::{LoginRepo, PasswordResetRepo};
use tower::ServiceExt;

async fn registration(pool: &PgPool, username: &str) -> serde_json::Value {
    let country_id = first_id(pool, "countries").await;
    serde_json::json!({
        "first_name": "Grace",
        "last_name": "Hopper",
        "email": format!("{username}@example.com"),
        "street_addr": "1 Navy Yard",
        "city": "Arlington",
        "state": "VA",
        "postal_code": "22202",
        "country": "United States",
        "country_id": country_id,
        "username": username,
        "password": "compiler1",
        "confirm_password": "compiler1",
    })
}

async fn login(app: axum::Router, username: &str, password: &str) -> axum::response::Response {
    let body = serde_json::json!({ "username": username, "password": password });
    post_json(app, "/api/v1/auth/login", body).await
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_creates_customer_login(pool: PgPool) {
    let body = registration(&pool, "grace").await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "grace");
    assert_eq!(json["data"]["role"], "customer");
    assert!(json["data"].get("password_hash").is_none());

    let stored = LoginRepo::find_by_username(&pool, "grace").await.unwrap().unwrap();
    assert_ne!(stored.password_hash, "compiler1");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_mismatched_passwords(pool: PgPool) {
    let mut body = registration(&pool, "mismatch").await;
    body["confirm_password"] = "compiler2".into();
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Passwords do not match");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_weak_password(pool: PgPool) {
    let mut body = registration(&pool, "weakling").await;
    body["password"] = "letters".into();
    body["confirm_password"] = "letters".into();
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_username_returns_409(pool: PgPool) {
    common::create_user(&pool, "taken", "customer").await;
    let mut body = registration(&pool, "taken").await;
    body["email"] = "someone-else@example.com".into();
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_token_and_session_cookie(pool: PgPool) {
    let user = common::create_user(&pool, "viewer", "customer").await;
    let app = common::build_test_app(pool.clone());

    let response = login(app, "viewer", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("login must set the session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));

    let json = body_json(response).await;
    assert!(json["token"].is_string());
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["user"]["id"], user.id);
    assert!(json["user"]["last_login_at"].is_string());

    let stored = LoginRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(stored.last_login_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_password_and_unknown_user_both_return_401(pool: PgPool) {
    common::create_user(&pool, "careful", "customer").await;
    let app = common::build_test_app(pool);

    let response = login(app.clone(), "careful", "not-the-password1").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = login(app, "ghost", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_accepts_bearer_token(pool: PgPool) {
    let (user, token) = common::customer_token(&pool, "bearer").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/auth/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["username"], user.username);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_accepts_session_cookie(pool: PgPool) {
    let (_, token) = common::customer_token(&pool, "cookie_user").await;
    let app = common::build_test_app(pool);

    let request = Request::builder()
        .uri("/api/v1/auth/me")
        .header(COOKIE, format!("session={token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_without_session_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/v1/auth/me", "not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn logout_expires_cookie(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/auth/logout", serde_json::json!({})).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(cookie.starts_with("session="));
    assert!(cookie.contains("Max-Age=0"));
}

// ---------------------------------------------------------------------------
// Password reset
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn forgot_password_is_202_for_known_and_unknown_addresses(pool: PgPool) {
    let user = common::create_user(&pool, "forgetful", "customer").await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app.clone(),
        "/api/v1/auth/forgot-password",
        serde_json::json!({ "email": "forgetful@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let response = post_json(
        app,
        "/api/v1/auth/forgot-password",
        serde_json::json!({ "email": "nobody@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let tokens = PasswordResetRepo::list_for_login(&pool, user.id).await.unwrap();
    assert_eq!(tokens.len(), 1);
    assert!(!tokens[0].used);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reset_token_is_single_use(pool: PgPool) {
    let user = common::create_user(&pool, "resetter", "customer").await;
    PasswordResetRepo::create(
        &pool,
        &CreatePasswordReset {
            login_id: user.id,
            token_hash: hash_reset_token("known-token"),
            expires_at: reset_token_expiry(Utc::now()),
        },
    )
    .await
    .unwrap();
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "token": "known-token",
        "new_password": "fresh-start9",
        "confirm_password": "fresh-start9",
    });

    let response = post_json(app.clone(), "/api/v1/auth/reset-password", body.clone()).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(app.clone(), "/api/v1/auth/reset-password", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = login(app.clone(), "resetter", "fresh-start9").await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = login(app, "resetter", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn expired_reset_token_is_rejected(pool: PgPool) {
    let user = common::create_user(&pool, "too_late", "customer").await;
    PasswordResetRepo::create(
        &pool,
        &CreatePasswordReset {
            login_id: user.id,
            token_hash: hash_reset_token("stale-token"),
            expires_at: Utc::now() - chrono::Duration::minutes(1),
        },
    )
    .await
    .unwrap();
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "token": "stale-token",
        "new_password": "fresh-start9",
        "confirm_password": "fresh-start9",
    });
    let response = post_json(app, "/api/v1/auth/reset-password", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Employee provisioning
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn employee_can_create_employee_but_customer_cannot(pool: PgPool) {
    let (_, employee) = common::employee_token(&pool, "manager").await;
    let (_, customer) = common::customer_token(&pool, "pretender").await;
    let body = registration(&pool, "new_hire").await;
    let app = common::build_test_app(pool);

    let response =
        post_json_auth(app.clone(), "/api/v1/admin/employees", &customer, body.clone()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(app, "/api/v1/admin/employees", &employee, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["role"], "employee");
}
