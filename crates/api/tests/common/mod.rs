//! Shared harness for the HTTP integration tests.
//!
//! Requests are driven through `tower::ServiceExt::oneshot` against the same
//! router `main.rs` builds, so the full middleware stack is exercised.

#![allow(dead_code)]

use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tower::ServiceExt;

use streamvault_api::auth::jwt::{generate_session_token, JwtConfig};
use streamvault_api::auth::password::hash_password;
use streamvault_api::config::ServerConfig;
use streamvault_api::router::build_app_router;
use streamvault_api::state::AppState;
use streamvault_core::roles::{ROLE_CUSTOMER, ROLE_EMPLOYEE};
use streamvault_db::models::login::{CreateLogin, Login};
use streamvault_db::models::user_account::CreateUserAccount;
use streamvault_db::repositories::UserAccountRepo;
use streamvault_db::retry::RetryPolicy;

pub const TEST_PASSWORD: &str = "binge2024";

/// Test configuration: no SMTP, cache enabled, zero retry backoff.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        database_url: String::new(),
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            session_expiry_mins: 60,
        },
        cache_enabled: true,
        cache_ttl_secs: 300,
        db_retry: RetryPolicy::new(3, Duration::ZERO),
        public_base_url: "http://localhost:5173".to_string(),
        email: None,
    }
}

pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn first_id(pool: &PgPool, table: &str) -> i64 {
    let (id,): (i64,) = sqlx::query_as(&format!("SELECT MIN(id) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap();
    id
}

/// Insert an account plus login with [`TEST_PASSWORD`] straight through the
/// repository.
pub async fn create_user(pool: &PgPool, username: &str, role: &str) -> Login {
    let country_id = first_id(pool, "countries").await;
    let account = CreateUserAccount {
        first_name: "Test".to_string(),
        middle_name: None,
        last_name: username.to_string(),
        email: format!("{username}@example.com"),
        street_addr: "1 Main St".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        postal_code: "62701".to_string(),
        country: "United States".to_string(),
        monthly_subscription: Decimal::new(10, 0),
        country_id,
    };
    let login = CreateLogin {
        account_id: 0,
        username: username.to_string(),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        role: role.to_string(),
    };
    let (_, login) = UserAccountRepo::register(pool, RetryPolicy::default(), &account, &login)
        .await
        .unwrap();
    login
}

/// Mint a session token for `login` without going through `/auth/login`.
pub fn token_for(login: &Login) -> String {
    generate_session_token(login.id, login.account_id, &login.role, &test_config().jwt).unwrap()
}

pub async fn customer_token(pool: &PgPool, username: &str) -> (Login, String) {
    let login = create_user(pool, username, ROLE_CUSTOMER).await;
    let token = token_for(&login);
    (login, token)
}

pub async fn employee_token(pool: &PgPool, username: &str) -> (Login, String) {
    let login = create_user(pool, username, ROLE_EMPLOYEE).await;
    let token = token_for(&login);
    (login, token)
}

/// Create a production house through the admin API and return its id.
pub async fn create_house(app: Router, token: &str, name: &str) -> i64 {
    let body = serde_json::json!({
        "name": name,
        "street_addr": "1 Studio Way",
        "city": "Burbank",
        "state": "CA",
        "postal_code": "91505",
        "country": "United States",
        "year_established": 1990,
    });
    let response = post_json_auth(app, "/api/v1/admin/production-houses", token, body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a series through the admin API and return its id.
pub async fn create_series(app: Router, token: &str, name: &str, house_id: i64) -> i64 {
    let body = serde_json::json!({
        "name": name,
        "num_episodes": 6,
        "language": "English",
        "release_date": "2024-03-01",
        "country_of_origin": "United States",
        "production_house_id": house_id,
    });
    let response = post_json_auth(app, "/api/v1/admin/series", token, body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
