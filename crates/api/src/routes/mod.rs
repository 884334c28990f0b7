pub mod account;
pub mod admin;
pub mod analytics;
pub mod auth;
pub mod health;
pub mod reference;
pub mod series;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register, /auth/login, /auth/logout        public
/// /auth/me                                         requires auth
/// /auth/forgot-password, /auth/reset-password      public
///
/// /series                                          browse (public)
/// /series/{id}                                     detail (public)
/// /series/{id}/feedback                            upsert, delete (requires auth)
///
/// /reference/{kind}                                list (public)
///
/// /account                                         get, update (requires auth)
///
/// /admin/...                                       back office (employee only)
/// /analytics/...                                   reports and cache (employee only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/series", series::router())
        .nest("/reference", reference::router())
        .nest("/account", account::router())
        .nest("/admin", admin::router())
        .nest("/analytics", analytics::router())
}
