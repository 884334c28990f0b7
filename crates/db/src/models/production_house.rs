//! Production house entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamvault_core::types::{DbId, Timestamp};

/// A row from the `production_houses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductionHouse {
    pub id: DbId,
    pub name: String,
    pub street_addr: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub year_established: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing row with the number of series and allied producers.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductionHouseListItem {
    pub id: DbId,
    pub name: String,
    pub city: String,
    pub country: String,
    pub year_established: i32,
    pub series_count: i64,
    pub producer_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductionHouse {
    pub name: String,
    pub street_addr: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub year_established: i32,
}

/// DTO for updating a production house. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductionHouse {
    pub name: Option<String>,
    pub street_addr: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub year_established: Option<i32>,
}
