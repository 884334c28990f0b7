//! Customer-facing catalogue projections.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamvault_core::types::{Date, DbId};

use crate::models::episode::Episode;
use crate::models::feedback::{Feedback, Review};

/// Browse filters. All optional; combined with AND.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogFilter {
    pub genre_id: Option<DbId>,
    pub language: Option<String>,
    pub country: Option<String>,
    /// Case-insensitive substring match on the series name.
    pub q: Option<String>,
}

/// One card in the browse listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CatalogEntry {
    pub id: DbId,
    pub name: String,
    pub language: String,
    pub country_of_origin: String,
    pub release_date: Date,
    pub num_episodes: i32,
    pub image_url: Option<String>,
    pub production_house: String,
    pub avg_rating: f64,
    pub rating_count: i64,
    pub total_viewers: i64,
    /// Comma-separated genre names, alphabetical.
    pub genres: Option<String>,
}

/// Distinct values offered as browse filters.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogFacets {
    pub languages: Vec<String>,
    pub countries: Vec<String>,
}

/// Series header for the detail page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SeriesHeader {
    pub id: DbId,
    pub name: String,
    pub num_episodes: i32,
    pub language: String,
    pub release_date: Date,
    pub country_of_origin: String,
    pub image_url: Option<String>,
    pub production_house_id: DbId,
    pub production_house_name: String,
    pub production_house_city: String,
    pub production_house_country: String,
    pub year_established: i32,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReleaseCountry {
    pub country_name: String,
    pub release_date: Date,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RatingInfo {
    pub avg_rating: f64,
    pub total_ratings: i64,
}

/// Everything the series detail page shows.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesDetail {
    pub series: SeriesHeader,
    pub episodes: Vec<Episode>,
    pub genres: Vec<String>,
    pub dubbing_languages: Vec<String>,
    pub subtitle_languages: Vec<String>,
    pub release_countries: Vec<ReleaseCountry>,
    pub rating: RatingInfo,
    pub total_viewers: i64,
    /// Ten most recent reviews, newest first.
    pub reviews: Vec<Review>,
    /// The caller's own feedback, when authenticated and present.
    pub my_feedback: Option<Feedback>,
}
