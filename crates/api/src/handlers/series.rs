//! Handlers for `/admin/series`.
//!
//! All handlers require the `employee` role via [`RequireEmployee`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use streamvault_core::error::CoreError;
use streamvault_core::types::DbId;
use streamvault_core::validation;
use streamvault_db::models::web_series::{
    CreateWebSeries, SeriesLinks, UpdateWebSeries, WebSeries, WebSeriesListItem,
    WebSeriesWithLinks,
};
use streamvault_db::repositories::WebSeriesRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEmployee;
use crate::state::AppState;

/// GET /api/v1/admin/series
pub async fn list(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<WebSeriesListItem>>> {
    let series = WebSeriesRepo::list(&state.pool).await?;
    Ok(Json(series))
}

/// POST /api/v1/admin/series
///
/// Inserts the series and all of its genre, country and language links in
/// one transaction.
pub async fn create(
    RequireEmployee(employee): RequireEmployee,
    State(state): State<AppState>,
    Json(input): Json<CreateWebSeries>,
) -> AppResult<(StatusCode, Json<WebSeriesWithLinks>)> {
    validation::validate_required("Name", &input.name)?;
    validation::validate_required("Language", &input.language)?;
    validation::validate_required("Country of origin", &input.country_of_origin)?;
    validation::validate_positive("Number of episodes", input.num_episodes)?;
    validate_links(&input.links)?;

    let series = WebSeriesRepo::create(&state.pool, state.config.db_retry, &input).await?;
    tracing::info!(
        web_series_id = series.id,
        created_by = employee.login_id,
        "Web series created"
    );

    Ok((
        StatusCode::CREATED,
        Json(WebSeriesWithLinks {
            series,
            links: input.links,
        }),
    ))
}

/// GET /api/v1/admin/series/{id}
pub async fn get_by_id(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<WebSeriesWithLinks>> {
    let series = WebSeriesRepo::find_with_links(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WebSeries",
            id,
        }))?;
    Ok(Json(series))
}

/// PUT /api/v1/admin/series/{id}
///
/// When `links` is present it replaces every existing link set.
pub async fn update(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWebSeries>,
) -> AppResult<Json<WebSeries>> {
    if let Some(name) = &input.name {
        validation::validate_required("Name", name)?;
    }
    if let Some(language) = &input.language {
        validation::validate_required("Language", language)?;
    }
    if let Some(country) = &input.country_of_origin {
        validation::validate_required("Country of origin", country)?;
    }
    if let Some(num_episodes) = input.num_episodes {
        validation::validate_positive("Number of episodes", num_episodes)?;
    }
    if let Some(links) = &input.links {
        validate_links(links)?;
    }

    let series = WebSeriesRepo::update(&state.pool, state.config.db_retry, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WebSeries",
            id,
        }))?;
    Ok(Json(series))
}

/// DELETE /api/v1/admin/series/{id}
///
/// Removes schedules, episodes, contracts, feedback and links before the
/// series itself, all in one transaction.
pub async fn delete(
    RequireEmployee(employee): RequireEmployee,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted =
        WebSeriesRepo::delete_with_dependents(&state.pool, state.config.db_retry, id).await?;
    if deleted {
        tracing::info!(web_series_id = id, deleted_by = employee.login_id, "Web series deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "WebSeries",
            id,
        }))
    }
}

/// Duplicate ids would trip the junction-table primary keys mid-transaction.
fn validate_links(links: &SeriesLinks) -> Result<(), CoreError> {
    let country_ids: Vec<DbId> = links.countries.iter().map(|c| c.country_id).collect();
    for (field, ids) in [
        ("genre_ids", links.genre_ids.as_slice()),
        ("countries", country_ids.as_slice()),
        ("dubbing_language_ids", links.dubbing_language_ids.as_slice()),
        ("subtitle_language_ids", links.subtitle_language_ids.as_slice()),
    ] {
        let mut sorted = ids.to_vec();
        sorted.sort_unstable();
        if sorted.windows(2).any(|w| w[0] == w[1]) {
            return Err(CoreError::Validation(format!("{field} contains duplicates")));
        }
    }
    Ok(())
}
