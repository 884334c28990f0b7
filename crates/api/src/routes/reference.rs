//! Route definitions for the public reference vocabularies.

use axum::routing::get;
use axum::Router;

use crate::handlers::reference;
use crate::state::AppState;

/// Routes mounted at `/reference`.
///
/// ```text
/// GET /{kind}   -> list (countries | genres | dubbing-languages | subtitle-languages)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{kind}", get(reference::list))
}
