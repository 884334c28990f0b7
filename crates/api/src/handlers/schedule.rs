//! Handlers for episode broadcast schedules.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use streamvault_core::error::CoreError;
use streamvault_core::types::DbId;
use streamvault_core::validation;
use streamvault_db::models::schedule::{CreateSchedule, Schedule};
use streamvault_db::repositories::{EpisodeRepo, ScheduleRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEmployee;
use crate::state::AppState;

/// GET /api/v1/admin/episodes/{episode_id}/schedules
pub async fn list_by_episode(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Path(episode_id): Path<DbId>,
) -> AppResult<Json<Vec<Schedule>>> {
    ensure_episode_exists(&state, episode_id).await?;
    let schedules = ScheduleRepo::list_by_episode(&state.pool, episode_id).await?;
    Ok(Json(schedules))
}

/// POST /api/v1/admin/episodes/{episode_id}/schedules
pub async fn create(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Path(episode_id): Path<DbId>,
    Json(input): Json<CreateSchedule>,
) -> AppResult<(StatusCode, Json<Schedule>)> {
    validation::validate_date_order("start_at", input.start_at, "end_at", input.end_at)?;
    ensure_episode_exists(&state, episode_id).await?;

    let schedule = ScheduleRepo::create(&state.pool, episode_id, &input).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

/// DELETE /api/v1/admin/schedules/{id}
pub async fn delete(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ScheduleRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Schedule",
            id,
        }))
    }
}

async fn ensure_episode_exists(state: &AppState, episode_id: DbId) -> AppResult<()> {
    match EpisodeRepo::find_by_id(&state.pool, episode_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::Core(CoreError::NotFound {
            entity: "Episode",
            id: episode_id,
        })),
    }
}
