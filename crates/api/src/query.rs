//! Shared query parameter types for API handlers.

use serde::Deserialize;
use streamvault_core::types::DbId;
use streamvault_db::models::catalog::CatalogFilter;
use streamvault_db::repositories::catalog_repo::CATALOG_PAGE_SIZE;

/// `GET /series` query string. Blank strings count as "no filter".
#[derive(Debug, Default, Deserialize)]
pub struct BrowseParams {
    pub genre_id: Option<DbId>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub q: Option<String>,
    pub page: Option<i64>,
}

impl BrowseParams {
    /// 1-based page, capped so its row offset fits in an `i64`.
    pub fn page(&self) -> i64 {
        self.page
            .unwrap_or(1)
            .clamp(1, i64::MAX / CATALOG_PAGE_SIZE)
    }

    pub fn filter(&self) -> CatalogFilter {
        CatalogFilter {
            genre_id: self.genre_id,
            language: non_blank(&self.language),
            country: non_blank(&self.country),
            q: non_blank(&self.q),
        }
    }
}

/// `?limit=` for the top-N reports.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

/// Default and ceiling for [`LimitParams`].
pub const DEFAULT_REPORT_LIMIT: i64 = 10;
pub const MAX_REPORT_LIMIT: i64 = 100;

impl LimitParams {
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_REPORT_LIMIT)
            .clamp(1, MAX_REPORT_LIMIT)
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
