//! Role-based access control extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use streamvault_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `employee` role. Anonymous callers get 401, customers 403.
///
/// ```ignore
/// async fn admin_only(RequireEmployee(user): RequireEmployee) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireEmployee(pub AuthUser);

impl FromRequestParts<AppState> for RequireEmployee {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user =
            <AuthUser as FromRequestParts<AppState>>::from_request_parts(parts, state).await?;
        if !user.is_employee() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Employee role required".into(),
            )));
        }
        Ok(RequireEmployee(user))
    }
}
