//! Handlers for the public `/series` catalogue.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;
use streamvault_core::error::CoreError;
use streamvault_core::types::DbId;
use streamvault_db::models::catalog::{CatalogEntry, CatalogFacets, SeriesDetail};
use streamvault_db::repositories::catalog_repo::CATALOG_PAGE_SIZE;
use streamvault_db::repositories::CatalogRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::BrowseParams;
use crate::state::AppState;

/// One page of catalogue results plus the filter vocabularies.
#[derive(Debug, Serialize)]
pub struct CatalogPage {
    pub items: Vec<CatalogEntry>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub facets: CatalogFacets,
}

/// GET /api/v1/series
///
/// Ordered by average rating, then total viewers. A page past the end
/// yields an empty `items` list rather than an error.
pub async fn browse(
    State(state): State<AppState>,
    Query(params): Query<BrowseParams>,
) -> AppResult<Json<CatalogPage>> {
    let page = params.page();
    let filter = params.filter();

    let (items, total) = CatalogRepo::browse(&state.pool, &filter, page).await?;
    let facets = CatalogRepo::facets(&state.pool).await?;

    Ok(Json(CatalogPage {
        items,
        total,
        page,
        page_size: CATALOG_PAGE_SIZE,
        total_pages: total_pages(total, CATALOG_PAGE_SIZE),
        facets,
    }))
}

/// GET /api/v1/series/{id}
///
/// Signed-in viewers also get their own feedback for the series.
pub async fn detail(
    State(state): State<AppState>,
    viewer: Option<AuthUser>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SeriesDetail>> {
    let viewer_account = viewer.map(|u| u.account_id);
    let detail = CatalogRepo::detail(&state.pool, id, viewer_account)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WebSeries",
            id,
        }))?;
    Ok(Json(detail))
}

fn total_pages(total: i64, page_size: i64) -> i64 {
    if total <= 0 {
        0
    } else {
        (total + page_size - 1) / page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
    }
}
