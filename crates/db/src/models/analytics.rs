//! Row types for the fixed reporting queries in
//! [`AnalyticsRepo`](crate::repositories::AnalyticsRepo).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamvault_core::types::{Date, DbId, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SeriesViewers {
    pub id: DbId,
    pub name: String,
    pub total_viewers: i64,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SeriesRating {
    pub id: DbId,
    pub name: String,
    pub avg_rating: f64,
    pub rating_count: i64,
}

/// Number of series per label (country or genre).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub series_count: i64,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct MonthlyFeedback {
    /// `YYYY-MM`
    pub month: String,
    pub feedback_count: i64,
    pub avg_rating: f64,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProductionHouseStats {
    pub id: DbId,
    pub name: String,
    pub series_count: i64,
    pub total_viewers: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct RatingBucket {
    pub rating: i32,
    pub count: i64,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CountryViewers {
    pub country_name: String,
    pub total_viewers: i64,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SeriesPerformance {
    pub id: DbId,
    pub name: String,
    pub language: String,
    pub country_of_origin: String,
    pub release_date: Date,
    pub num_episodes: i32,
    pub production_house: String,
    pub avg_rating: f64,
    pub rating_count: i64,
    pub total_viewers: i64,
    /// Episodes actually catalogued, as opposed to the announced count.
    pub actual_episodes: i64,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserEngagement {
    pub account_id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub created_at: Timestamp,
    pub country_name: Option<String>,
    pub feedback_count: i64,
    pub avg_rating_given: f64,
    pub last_feedback_at: Timestamp,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ViewerPercentile {
    pub id: DbId,
    pub name: String,
    pub total_viewers: i64,
    /// `PERCENT_RANK()` over total viewers, 0.0 to 1.0.
    pub percentile: f64,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SeriesAboveHouseAverage {
    pub id: DbId,
    pub name: String,
    pub production_house_name: String,
    pub total_viewers: i64,
    pub house_average_viewers: f64,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UnratedSeries {
    pub id: DbId,
    pub name: String,
}
