//! Handlers for `/admin/production-houses`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use streamvault_core::error::CoreError;
use streamvault_core::types::DbId;
use streamvault_core::validation;
use streamvault_db::models::production_house::{
    CreateProductionHouse, ProductionHouse, ProductionHouseListItem, UpdateProductionHouse,
};
use streamvault_db::repositories::{HouseDeleteOutcome, ProductionHouseRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEmployee;
use crate::state::AppState;

/// POST /api/v1/admin/production-houses
pub async fn create(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Json(input): Json<CreateProductionHouse>,
) -> AppResult<(StatusCode, Json<ProductionHouse>)> {
    for (field, value) in [
        ("Name", &input.name),
        ("Street address", &input.street_addr),
        ("City", &input.city),
        ("State", &input.state),
        ("Postal code", &input.postal_code),
        ("Country", &input.country),
    ] {
        validation::validate_required(field, value)?;
    }
    validation::validate_year_established(input.year_established)?;

    let house = ProductionHouseRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(house)))
}

/// GET /api/v1/admin/production-houses
pub async fn list(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProductionHouseListItem>>> {
    let houses = ProductionHouseRepo::list(&state.pool).await?;
    Ok(Json(houses))
}

/// GET /api/v1/admin/production-houses/{id}
pub async fn get_by_id(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProductionHouse>> {
    let house = ProductionHouseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProductionHouse",
            id,
        }))?;
    Ok(Json(house))
}

/// PUT /api/v1/admin/production-houses/{id}
pub async fn update(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProductionHouse>,
) -> AppResult<Json<ProductionHouse>> {
    if let Some(name) = &input.name {
        validation::validate_required("Name", name)?;
    }
    if let Some(year) = input.year_established {
        validation::validate_year_established(year)?;
    }

    let house = ProductionHouseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProductionHouse",
            id,
        }))?;
    Ok(Json(house))
}

/// DELETE /api/v1/admin/production-houses/{id}
///
/// Refused with 409 while any series still belongs to the house. Producer
/// associations are removed along with it.
pub async fn delete(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    match ProductionHouseRepo::delete(&state.pool, state.config.db_retry, id).await? {
        HouseDeleteOutcome::Deleted => Ok(StatusCode::NO_CONTENT),
        HouseDeleteOutcome::NotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "ProductionHouse",
            id,
        })),
        HouseDeleteOutcome::HasSeries(count) => Err(AppError::Core(CoreError::Conflict(format!(
            "Production house still has {count} web series"
        )))),
    }
}
