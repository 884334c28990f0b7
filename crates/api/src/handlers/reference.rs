//! Handlers for the reference vocabularies under `/reference/{kind}`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use streamvault_core::error::CoreError;
use streamvault_core::types::DbId;
use streamvault_core::validation;
use streamvault_db::models::reference::{CreateReferenceItem, ReferenceItem, ReferenceKind};
use streamvault_db::repositories::ReferenceRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEmployee;
use crate::state::AppState;

/// GET /api/v1/reference/{kind}
pub async fn list(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> AppResult<Json<Vec<ReferenceItem>>> {
    let kind = parse_kind(&kind)?;
    let items = ReferenceRepo::list(&state.pool, kind).await?;
    Ok(Json(items))
}

/// POST /api/v1/admin/reference/{kind}
pub async fn create(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(input): Json<CreateReferenceItem>,
) -> AppResult<(StatusCode, Json<ReferenceItem>)> {
    let kind = parse_kind(&kind)?;
    validation::validate_required("Name", &input.name)?;
    let item = ReferenceRepo::create(&state.pool, kind, input.name.trim()).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// DELETE /api/v1/admin/reference/{kind}/{id}
///
/// Entries still referenced by a series or account answer 409.
pub async fn delete(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, DbId)>,
) -> AppResult<StatusCode> {
    let kind = parse_kind(&kind)?;
    if ReferenceRepo::delete(&state.pool, kind, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: kind.entity_name(),
            id,
        }))
    }
}

fn parse_kind(slug: &str) -> AppResult<ReferenceKind> {
    ReferenceKind::from_slug(slug).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Unknown reference list '{slug}'; expected one of countries, genres, \
             dubbing-languages, subtitle-languages"
        ))
    })
}
