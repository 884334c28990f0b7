//! Producer entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamvault_core::types::{DbId, Timestamp};

/// A row from the `producers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Producer {
    pub id: DbId,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub street_addr: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone_number: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing row: producer plus the number of houses they are allied with.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProducerListItem {
    pub id: DbId,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub city: String,
    pub country: String,
    pub phone_number: String,
    pub email: String,
    pub house_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProducer {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub street_addr: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub phone_number: String,
    pub email: String,
}

/// DTO for updating a producer. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProducer {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub street_addr: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}
