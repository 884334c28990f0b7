//! Producer / production-house alliance (the `producer_production_houses`
//! junction table).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamvault_core::types::{Date, DbId, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Association {
    pub producer_id: DbId,
    pub production_house_id: DbId,
    pub alliance_date: Date,
    pub end_date: Option<Date>,
    pub created_at: Timestamp,
}

/// Association joined with the producer's name and the house name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssociationDetail {
    pub producer_id: DbId,
    pub production_house_id: DbId,
    pub alliance_date: Date,
    pub end_date: Option<Date>,
    pub producer_first_name: String,
    pub producer_last_name: String,
    pub production_house_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssociation {
    pub producer_id: DbId,
    pub production_house_id: DbId,
    pub alliance_date: Date,
    /// `None` for an alliance that is still running.
    pub end_date: Option<Date>,
}
