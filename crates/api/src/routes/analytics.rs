//! Route definitions for `/analytics` (employee only).

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::analytics;
use crate::state::AppState;

/// Routes mounted at `/analytics`.
///
/// ```text
/// GET    /top-series-by-viewers   -> top_series_by_viewers (?limit)
/// GET    /top-series-by-rating    -> top_series_by_rating (?limit)
/// GET    /series-per-country      -> series_per_country
/// GET    /series-per-genre        -> series_per_genre
/// GET    /monthly-feedback        -> monthly_feedback
/// GET    /production-houses       -> production_house_stats
/// GET    /rating-distribution     -> rating_distribution
/// GET    /top-countries           -> top_countries_by_viewers
/// GET    /series-performance      -> series_performance
/// GET    /user-engagement         -> user_engagement
/// GET    /viewer-percentiles      -> viewer_percentiles
/// GET    /above-house-average     -> series_above_house_average
/// GET    /unrated-series          -> unrated_series
///
/// GET    /cache-stats             -> cache_stats
/// DELETE /cache                   -> clear_cache
/// DELETE /cache/{key}             -> invalidate_cache_key
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/top-series-by-viewers",
            get(analytics::top_series_by_viewers),
        )
        .route("/top-series-by-rating", get(analytics::top_series_by_rating))
        .route("/series-per-country", get(analytics::series_per_country))
        .route("/series-per-genre", get(analytics::series_per_genre))
        .route("/monthly-feedback", get(analytics::monthly_feedback))
        .route("/production-houses", get(analytics::production_house_stats))
        .route("/rating-distribution", get(analytics::rating_distribution))
        .route("/top-countries", get(analytics::top_countries_by_viewers))
        .route("/series-performance", get(analytics::series_performance))
        .route("/user-engagement", get(analytics::user_engagement))
        .route("/viewer-percentiles", get(analytics::viewer_percentiles))
        .route(
            "/above-house-average",
            get(analytics::series_above_house_average),
        )
        .route("/unrated-series", get(analytics::unrated_series))
        .route("/cache-stats", get(analytics::cache_stats))
        .route("/cache", delete(analytics::clear_cache))
        .route("/cache/{key}", delete(analytics::invalidate_cache_key))
}
