//! Episode entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamvault_core::types::{DbId, Timestamp};

/// A row from the `episodes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Episode {
    pub id: DbId,
    pub web_series_id: DbId,
    pub name: String,
    pub total_viewers: i64,
    pub tech_interrupt: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Admin listing row with the number of broadcast slots.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EpisodeListItem {
    pub id: DbId,
    pub web_series_id: DbId,
    pub name: String,
    pub total_viewers: i64,
    pub tech_interrupt: bool,
    pub schedule_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEpisode {
    pub name: String,
    #[serde(default)]
    pub total_viewers: i64,
    #[serde(default)]
    pub tech_interrupt: bool,
}

/// DTO for updating an episode. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEpisode {
    pub name: Option<String>,
    pub total_viewers: Option<i64>,
    pub tech_interrupt: Option<bool>,
}
