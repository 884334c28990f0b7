//! Web series entity model and DTOs, including the junction-table links
//! (genres, release countries, dubbing and subtitle languages).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamvault_core::types::{Date, DbId, Timestamp};

/// A row from the `web_series` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WebSeries {
    pub id: DbId,
    pub name: String,
    pub num_episodes: i32,
    pub language: String,
    pub release_date: Date,
    pub country_of_origin: String,
    pub image_url: Option<String>,
    pub production_house_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Admin listing row: series plus its production house name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WebSeriesListItem {
    pub id: DbId,
    pub name: String,
    pub num_episodes: i32,
    pub language: String,
    pub release_date: Date,
    pub country_of_origin: String,
    pub production_house_id: DbId,
    pub production_house_name: String,
}

/// Release of a series in one country.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct CountryRelease {
    pub country_id: DbId,
    pub release_date: Date,
}

/// Current junction rows of one series, as ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesLinks {
    #[serde(default)]
    pub genre_ids: Vec<DbId>,
    #[serde(default)]
    pub countries: Vec<CountryRelease>,
    #[serde(default)]
    pub dubbing_language_ids: Vec<DbId>,
    #[serde(default)]
    pub subtitle_language_ids: Vec<DbId>,
}

/// Series row together with its links (admin edit view).
#[derive(Debug, Clone, Serialize)]
pub struct WebSeriesWithLinks {
    #[serde(flatten)]
    pub series: WebSeries,
    #[serde(flatten)]
    pub links: SeriesLinks,
}

/// DTO for creating a series and its junction rows in one transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWebSeries {
    pub name: String,
    pub num_episodes: i32,
    pub language: String,
    pub release_date: Date,
    pub country_of_origin: String,
    pub image_url: Option<String>,
    pub production_house_id: DbId,
    #[serde(flatten)]
    pub links: SeriesLinks,
}

/// DTO for updating a series. Scalar fields are optional; `links`, when
/// present, replaces every junction row of the series.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateWebSeries {
    pub name: Option<String>,
    pub num_episodes: Option<i32>,
    pub language: Option<String>,
    pub release_date: Option<Date>,
    pub country_of_origin: Option<String>,
    pub image_url: Option<String>,
    pub production_house_id: Option<DbId>,
    pub links: Option<SeriesLinks>,
}
