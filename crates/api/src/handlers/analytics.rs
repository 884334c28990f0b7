//! Handlers for `/analytics`: fixed reports plus cache administration.
//!
//! Every report is served through the shared [`ReportCache`]; results may be
//! up to one TTL stale. Writes elsewhere in the API never invalidate them.
//!
//! [`ReportCache`]: crate::state::ReportCache

use std::future::Future;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use streamvault_core::cache::CacheStats;
use streamvault_db::repositories::AnalyticsRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEmployee;
use crate::query::LimitParams;
use crate::state::AppState;

/// Body of the cache-clearing endpoints.
#[derive(Debug, Serialize)]
pub struct CacheClearResponse {
    pub removed: usize,
}

/// Serve `key` from the cache, computing and storing it on a miss.
async fn cached<T, F, Fut>(
    state: &AppState,
    key: &str,
    compute: F,
) -> AppResult<Json<serde_json::Value>>
where
    T: Serialize,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let value = state
        .cache
        .get_or_try_insert_with(key, || async {
            let rows = compute().await.map_err(AppError::from)?;
            serde_json::to_value(rows)
                .map_err(|e| AppError::InternalError(format!("Report serialization error: {e}")))
        })
        .await?;
    Ok(Json(value))
}

/// GET /api/v1/analytics/top-series-by-viewers?limit=N
pub async fn top_series_by_viewers(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<serde_json::Value>> {
    let limit = params.limit();
    cached(&state, &format!("top_series_by_viewers:{limit}"), || {
        AnalyticsRepo::top_series_by_viewers(&state.pool, limit)
    })
    .await
}

/// GET /api/v1/analytics/top-series-by-rating?limit=N
pub async fn top_series_by_rating(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<serde_json::Value>> {
    let limit = params.limit();
    cached(&state, &format!("top_series_by_rating:{limit}"), || {
        AnalyticsRepo::top_series_by_rating(&state.pool, limit)
    })
    .await
}

/// GET /api/v1/analytics/series-per-country
pub async fn series_per_country(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    cached(&state, "series_per_country", || {
        AnalyticsRepo::series_per_country(&state.pool)
    })
    .await
}

/// GET /api/v1/analytics/series-per-genre
pub async fn series_per_genre(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    cached(&state, "series_per_genre", || {
        AnalyticsRepo::series_per_genre(&state.pool)
    })
    .await
}

/// GET /api/v1/analytics/monthly-feedback
pub async fn monthly_feedback(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    cached(&state, "monthly_feedback", || {
        AnalyticsRepo::monthly_feedback(&state.pool)
    })
    .await
}

/// GET /api/v1/analytics/production-houses
pub async fn production_house_stats(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    cached(&state, "production_house_stats", || {
        AnalyticsRepo::production_house_stats(&state.pool)
    })
    .await
}

/// GET /api/v1/analytics/rating-distribution
pub async fn rating_distribution(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    cached(&state, "rating_distribution", || {
        AnalyticsRepo::rating_distribution(&state.pool)
    })
    .await
}

/// GET /api/v1/analytics/top-countries
pub async fn top_countries_by_viewers(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    cached(&state, "top_countries_by_viewers", || {
        AnalyticsRepo::top_countries_by_viewers(&state.pool)
    })
    .await
}

/// GET /api/v1/analytics/series-performance
pub async fn series_performance(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    cached(&state, "series_performance", || {
        AnalyticsRepo::series_performance(&state.pool)
    })
    .await
}

/// GET /api/v1/analytics/user-engagement
pub async fn user_engagement(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    cached(&state, "user_engagement", || {
        AnalyticsRepo::user_engagement(&state.pool)
    })
    .await
}

/// GET /api/v1/analytics/viewer-percentiles
pub async fn viewer_percentiles(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    cached(&state, "viewer_percentiles", || {
        AnalyticsRepo::viewer_percentiles(&state.pool)
    })
    .await
}

/// GET /api/v1/analytics/above-house-average
pub async fn series_above_house_average(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    cached(&state, "series_above_house_average", || {
        AnalyticsRepo::series_above_house_average(&state.pool)
    })
    .await
}

/// GET /api/v1/analytics/unrated-series
pub async fn unrated_series(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    cached(&state, "unrated_series", || {
        AnalyticsRepo::unrated_series(&state.pool)
    })
    .await
}

/// GET /api/v1/analytics/cache-stats
pub async fn cache_stats(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
) -> Json<CacheStats> {
    Json(state.cache.stats().await)
}

/// DELETE /api/v1/analytics/cache
pub async fn clear_cache(
    RequireEmployee(employee): RequireEmployee,
    State(state): State<AppState>,
) -> Json<CacheClearResponse> {
    let removed = state.cache.clear().await;
    tracing::info!(removed, cleared_by = employee.login_id, "Report cache cleared");
    Json(CacheClearResponse { removed })
}

/// DELETE /api/v1/analytics/cache/{key}
pub async fn invalidate_cache_key(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<CacheClearResponse> {
    let removed = usize::from(state.cache.invalidate(&key).await);
    Json(CacheClearResponse { removed })
}
