//! Broadcast schedule model and DTO.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamvault_core::types::{DbId, Timestamp};

/// A row from the `schedules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Schedule {
    pub id: DbId,
    pub episode_id: DbId,
    pub start_at: Timestamp,
    pub end_at: Timestamp,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSchedule {
    pub start_at: Timestamp,
    pub end_at: Timestamp,
}
