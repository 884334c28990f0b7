//! Handlers for `/admin/contracts`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use streamvault_core::error::CoreError;
use streamvault_core::types::DbId;
use streamvault_core::validation;
use streamvault_db::models::contract::{Contract, ContractListItem, CreateContract, UpdateContract};
use streamvault_db::repositories::ContractRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEmployee;
use crate::state::AppState;

/// POST /api/v1/admin/contracts
pub async fn create(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Json(input): Json<CreateContract>,
) -> AppResult<(StatusCode, Json<Contract>)> {
    validation::validate_positive("Per-episode charge", input.per_episode_charge)?;
    validation::validate_date_order("start_date", input.start_date, "end_date", input.end_date)?;

    let contract = ContractRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(contract)))
}

/// GET /api/v1/admin/contracts
pub async fn list(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ContractListItem>>> {
    let contracts = ContractRepo::list(&state.pool).await?;
    Ok(Json(contracts))
}

/// GET /api/v1/admin/contracts/{id}
pub async fn get_by_id(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Contract>> {
    let contract = find(&state, id).await?;
    Ok(Json(contract))
}

/// PUT /api/v1/admin/contracts/{id}
///
/// Date order is checked against the merged result, so changing only one
/// end of the range is validated too.
pub async fn update(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContract>,
) -> AppResult<Json<Contract>> {
    if let Some(charge) = input.per_episode_charge {
        validation::validate_positive("Per-episode charge", charge)?;
    }
    if input.start_date.is_some() || input.end_date.is_some() {
        let current = find(&state, id).await?;
        let start = input.start_date.unwrap_or(current.start_date);
        let end = input.end_date.unwrap_or(current.end_date);
        validation::validate_date_order("start_date", start, "end_date", end)?;
    }

    let contract = ContractRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Contract",
            id,
        }))?;
    Ok(Json(contract))
}

/// DELETE /api/v1/admin/contracts/{id}
pub async fn delete(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ContractRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Contract",
            id,
        }))
    }
}

async fn find(state: &AppState, id: DbId) -> AppResult<Contract> {
    ContractRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Contract",
            id,
        }))
}
