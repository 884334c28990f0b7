//! Admin dashboard projections.

use serde::Serialize;
use sqlx::FromRow;
use streamvault_core::types::{Date, DbId};

/// Row counts for the main tables.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DashboardCounts {
    pub series_count: i64,
    pub episode_count: i64,
    pub user_count: i64,
    pub feedback_count: i64,
    pub contract_count: i64,
    pub producer_count: i64,
    pub production_house_count: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecentSeries {
    pub id: DbId,
    pub name: String,
    pub release_date: Date,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub counts: DashboardCounts,
    /// Five most recently created series.
    pub recent_series: Vec<RecentSeries>,
}
