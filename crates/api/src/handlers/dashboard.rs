//! Handler for the employee dashboard.

use axum::extract::State;
use axum::Json;
use streamvault_db::models::dashboard::Dashboard;
use streamvault_db::repositories::DashboardRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireEmployee;
use crate::state::AppState;

/// GET /api/v1/admin/dashboard
pub async fn get(
    RequireEmployee(_employee): RequireEmployee,
    State(state): State<AppState>,
) -> AppResult<Json<Dashboard>> {
    let dashboard = DashboardRepo::load(&state.pool).await?;
    Ok(Json(dashboard))
}
