//! User account (customer or employee profile) model and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamvault_core::types::{DbId, Timestamp};

/// A row from the `user_accounts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserAccount {
    pub id: DbId,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub street_addr: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub monthly_subscription: Decimal,
    pub country_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Account joined with its country's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AccountProfile {
    pub id: DbId,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub street_addr: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub monthly_subscription: Decimal,
    pub country_id: DbId,
    pub country_name: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserAccount {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub street_addr: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub monthly_subscription: Decimal,
    pub country_id: DbId,
}

/// Self-service profile update: address and subscription only.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserAccount {
    pub street_addr: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub country_id: Option<DbId>,
    pub monthly_subscription: Option<Decimal>,
}
