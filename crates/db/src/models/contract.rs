//! Contract entity model and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamvault_core::types::{Date, DbId, Timestamp};

/// A row from the `contracts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contract {
    pub id: DbId,
    pub web_series_id: DbId,
    pub per_episode_charge: Decimal,
    pub start_date: Date,
    pub end_date: Date,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing row with the series name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContractListItem {
    pub id: DbId,
    pub web_series_id: DbId,
    pub web_series_name: String,
    pub per_episode_charge: Decimal,
    pub start_date: Date,
    pub end_date: Date,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateContract {
    pub web_series_id: DbId,
    pub per_episode_charge: Decimal,
    pub start_date: Date,
    pub end_date: Date,
}

/// DTO for updating a contract. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContract {
    pub web_series_id: Option<DbId>,
    pub per_episode_charge: Option<Decimal>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}
