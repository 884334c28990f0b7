//! Route definitions for the public `/series` catalogue.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{catalog, feedback};
use crate::state::AppState;

/// Routes mounted at `/series`.
///
/// ```text
/// GET    /                -> browse
/// GET    /{id}            -> detail
/// PUT    /{id}/feedback   -> feedback::upsert (requires auth)
/// DELETE /{id}/feedback   -> feedback::delete (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::browse))
        .route("/{id}", get(catalog::detail))
        .route(
            "/{id}/feedback",
            put(feedback::upsert).delete(feedback::delete),
        )
}
