//! Handlers for the signed-in user's own `/account`.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use streamvault_core::error::CoreError;
use streamvault_core::validation;
use streamvault_db::models::feedback::FeedbackHistoryItem;
use streamvault_db::models::user_account::{AccountProfile, UpdateUserAccount};
use streamvault_db::repositories::{FeedbackRepo, UserAccountRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Profile plus every rating the account has left, newest first.
#[derive(Debug, Serialize)]
pub struct AccountView {
    pub profile: AccountProfile,
    pub feedback_history: Vec<FeedbackHistoryItem>,
}

/// GET /api/v1/account
pub async fn get(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<AccountView>> {
    Ok(Json(load_view(&state, &user).await?))
}

/// PUT /api/v1/account
///
/// Address, country and subscription only; names, e-mail and credentials
/// are not editable here.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateUserAccount>,
) -> AppResult<Json<AccountView>> {
    if let Some(amount) = input.monthly_subscription {
        validation::validate_non_negative("Monthly subscription", amount)?;
    }
    for (field, value) in [
        ("Street address", &input.street_addr),
        ("City", &input.city),
        ("State", &input.state),
        ("Postal code", &input.postal_code),
        ("Country", &input.country),
    ] {
        if let Some(value) = value {
            validation::validate_required(field, value)?;
        }
    }

    UserAccountRepo::update(&state.pool, user.account_id, &input)
        .await?
        .ok_or_else(|| account_missing(&user))?;
    tracing::info!(account_id = user.account_id, "Account updated");

    Ok(Json(load_view(&state, &user).await?))
}

async fn load_view(state: &AppState, user: &AuthUser) -> AppResult<AccountView> {
    let profile = UserAccountRepo::profile(&state.pool, user.account_id)
        .await?
        .ok_or_else(|| account_missing(user))?;
    let feedback_history = FeedbackRepo::history_for_account(&state.pool, user.account_id).await?;
    Ok(AccountView {
        profile,
        feedback_history,
    })
}

fn account_missing(user: &AuthUser) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "UserAccount",
        id: user.account_id,
    })
}
