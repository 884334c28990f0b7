//! Handlers for producer / production-house associations.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use streamvault_core::error::CoreError;
use streamvault_core::types::DbId;
use streamvault_core::validation;
use streamvault_db::models::association::{Association, AssociationDetail, CreateAssociation};
use streamvault_db::repositories::AssociationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEmployee;
use crate::state::AppState;

/// GET /api/v1/admin/associations
pub async fn list(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AssociationDetail>>> {
    let associations = AssociationRepo::list(&state.pool).await?;
    Ok(Json(associations))
}

/// POST /api/v1/admin/associations
///
/// `end_date` may be omitted for an alliance that is still running.
pub async fn create(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Json(input): Json<CreateAssociation>,
) -> AppResult<(StatusCode, Json<Association>)> {
    if let Some(end_date) = input.end_date {
        validation::validate_date_order("alliance_date", input.alliance_date, "end_date", end_date)?;
    }

    let association = AssociationRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(association)))
}

/// DELETE /api/v1/admin/associations/{producer_id}/{house_id}
pub async fn delete(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Path((producer_id, house_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if AssociationRepo::delete(&state.pool, producer_id, house_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Association",
            id: producer_id,
        }))
    }
}
