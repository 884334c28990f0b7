//! Root-level liveness probe for StreamVault.
//!
//! Always answers 200 so a load balancer can tell "process up" from "process
//! gone"; `status` says whether PostgreSQL is reachable.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `ok`, or `degraded` when `SELECT 1` fails.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub report_cache_enabled: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let db_healthy = match streamvault_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Catalogue database unreachable");
            false
        }
    };

    Json(HealthReport {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        report_cache_enabled: state.cache.is_enabled(),
    })
}

/// `GET /health`, merged outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
