//! Route definitions for `/account`.

use axum::routing::get;
use axum::Router;

use crate::handlers::account;
use crate::state::AppState;

/// Routes mounted at `/account` (requires auth).
///
/// ```text
/// GET /   -> get
/// PUT /   -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(account::get).put(account::update))
}
