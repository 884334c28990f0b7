//! Handlers for a viewer's own feedback on a series.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use streamvault_core::error::CoreError;
use streamvault_core::types::DbId;
use streamvault_core::validation;
use streamvault_db::models::feedback::{Feedback, UpsertFeedback};
use streamvault_db::repositories::{FeedbackRepo, WebSeriesRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// PUT /api/v1/series/{id}/feedback
///
/// One row per (series, account): a second submission replaces the first.
pub async fn upsert(
    State(state): State<AppState>,
    user: AuthUser,
    Path(series_id): Path<DbId>,
    Json(input): Json<UpsertFeedback>,
) -> AppResult<Json<Feedback>> {
    validation::validate_rating(input.rating)?;

    if WebSeriesRepo::find_by_id(&state.pool, series_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "WebSeries",
            id: series_id,
        }));
    }

    let input = UpsertFeedback {
        rating: input.rating,
        feedback_text: input.feedback_text.trim().to_string(),
    };
    let feedback = FeedbackRepo::upsert(&state.pool, series_id, user.account_id, &input).await?;

    tracing::info!(
        web_series_id = series_id,
        account_id = user.account_id,
        rating = feedback.rating,
        "Feedback recorded"
    );
    Ok(Json(feedback))
}

/// DELETE /api/v1/series/{id}/feedback
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(series_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = FeedbackRepo::delete(&state.pool, series_id, user.account_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Feedback",
            id: series_id,
        }))
    }
}
