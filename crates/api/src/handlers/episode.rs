//! Handlers for episodes under `/admin/series/{id}/episodes` and
//! `/admin/episodes/{id}`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use streamvault_core::error::CoreError;
use streamvault_core::types::DbId;
use streamvault_core::validation;
use streamvault_db::models::episode::{CreateEpisode, Episode, EpisodeListItem, UpdateEpisode};
use streamvault_db::repositories::{EpisodeRepo, WebSeriesRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEmployee;
use crate::state::AppState;

/// Request body for `POST /admin/episodes/{id}/viewers`.
#[derive(Debug, Deserialize)]
pub struct RecordViewersRequest {
    pub total_viewers: i64,
}

/// GET /api/v1/admin/series/{series_id}/episodes
pub async fn list_by_series(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Path(series_id): Path<DbId>,
) -> AppResult<Json<Vec<EpisodeListItem>>> {
    ensure_series_exists(&state, series_id).await?;
    let episodes = EpisodeRepo::list_with_schedule_counts(&state.pool, series_id).await?;
    Ok(Json(episodes))
}

/// POST /api/v1/admin/series/{series_id}/episodes
pub async fn create(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Path(series_id): Path<DbId>,
    Json(input): Json<CreateEpisode>,
) -> AppResult<(StatusCode, Json<Episode>)> {
    validation::validate_required("Name", &input.name)?;
    validation::validate_non_negative("Total viewers", input.total_viewers)?;
    ensure_series_exists(&state, series_id).await?;

    let episode = EpisodeRepo::create(&state.pool, series_id, &input).await?;
    Ok((StatusCode::CREATED, Json(episode)))
}

/// PUT /api/v1/admin/episodes/{id}
pub async fn update(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEpisode>,
) -> AppResult<Json<Episode>> {
    if let Some(name) = &input.name {
        validation::validate_required("Name", name)?;
    }
    if let Some(viewers) = input.total_viewers {
        validation::validate_non_negative("Total viewers", viewers)?;
    }

    let episode = EpisodeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Episode",
            id,
        }))?;
    Ok(Json(episode))
}

/// DELETE /api/v1/admin/episodes/{id}
///
/// The episode's schedules go with it.
pub async fn delete(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = EpisodeRepo::delete(&state.pool, state.config.db_retry, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Episode",
            id,
        }))
    }
}

/// POST /api/v1/admin/episodes/{id}/viewers
///
/// Sets the viewer count through the `record_episode_viewers` procedure.
/// An unknown episode surfaces from the procedure as a 404.
pub async fn record_viewers(
    RequireEmployee(employee): RequireEmployee,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RecordViewersRequest>,
) -> AppResult<Json<Episode>> {
    validation::validate_non_negative("Total viewers", input.total_viewers)?;

    EpisodeRepo::record_viewers(&state.pool, state.config.db_retry, id, input.total_viewers)
        .await?;
    tracing::info!(
        episode_id = id,
        total_viewers = input.total_viewers,
        recorded_by = employee.login_id,
        "Viewer count recorded"
    );

    let episode = EpisodeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Episode",
            id,
        }))?;
    Ok(Json(episode))
}

async fn ensure_series_exists(state: &AppState, series_id: DbId) -> AppResult<()> {
    WebSeriesRepo::find_by_id(&state.pool, series_id)
        .await?
        .map(|_| ())
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WebSeries",
            id: series_id,
        }))
}
