//! Handlers for `/admin/producers`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use streamvault_core::error::CoreError;
use streamvault_core::types::DbId;
use streamvault_core::validation;
use streamvault_db::models::producer::{
    CreateProducer, Producer, ProducerListItem, UpdateProducer,
};
use streamvault_db::repositories::ProducerRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEmployee;
use crate::state::AppState;

/// POST /api/v1/admin/producers
pub async fn create(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Json(input): Json<CreateProducer>,
) -> AppResult<(StatusCode, Json<Producer>)> {
    for (field, value) in [
        ("First name", &input.first_name),
        ("Last name", &input.last_name),
        ("Street address", &input.street_addr),
        ("City", &input.city),
        ("State", &input.state),
        ("Postal code", &input.postal_code),
        ("Country", &input.country),
        ("Phone number", &input.phone_number),
    ] {
        validation::validate_required(field, value)?;
    }
    validation::validate_email(input.email.trim())?;

    let producer = ProducerRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(producer)))
}

/// GET /api/v1/admin/producers
pub async fn list(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProducerListItem>>> {
    let producers = ProducerRepo::list(&state.pool).await?;
    Ok(Json(producers))
}

/// GET /api/v1/admin/producers/{id}
pub async fn get_by_id(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Producer>> {
    let producer = ProducerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Producer",
            id,
        }))?;
    Ok(Json(producer))
}

/// PUT /api/v1/admin/producers/{id}
pub async fn update(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProducer>,
) -> AppResult<Json<Producer>> {
    if let Some(email) = &input.email {
        validation::validate_email(email.trim())?;
    }
    for (field, value) in [
        ("First name", &input.first_name),
        ("Last name", &input.last_name),
        ("Phone number", &input.phone_number),
    ] {
        if let Some(value) = value {
            validation::validate_required(field, value)?;
        }
    }

    let producer = ProducerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Producer",
            id,
        }))?;
    Ok(Json(producer))
}

/// DELETE /api/v1/admin/producers/{id}
///
/// The producer's house associations are removed in the same transaction.
pub async fn delete(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProducerRepo::delete(&state.pool, state.config.db_retry, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Producer",
            id,
        }))
    }
}
