//! Handlers for the `/auth` resource and employee provisioning.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use streamvault_core::error::CoreError;
use streamvault_core::roles::{ROLE_CUSTOMER, ROLE_EMPLOYEE};
use streamvault_core::types::DbId;
use streamvault_core::validation;
use streamvault_db::models::login::{CreateLogin, LoginResponse};
use streamvault_db::models::password_reset::CreatePasswordReset;
use streamvault_db::models::user_account::CreateUserAccount;
use streamvault_db::repositories::{LoginRepo, PasswordResetRepo, UserAccountRepo};
use validator::Validate;

use crate::auth::jwt::{generate_session_token, SESSION_COOKIE};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::reset_token::{
    generate_reset_token, hash_reset_token, reset_link, reset_token_expiry,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireEmployee;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register` and `POST /admin/employees`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    pub middle_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    #[validate(email, length(max = 100))]
    pub email: String,
    #[validate(length(min = 1))]
    pub street_addr: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub state: String,
    #[validate(length(min = 1))]
    pub postal_code: String,
    #[validate(length(min = 1))]
    pub country: String,
    pub country_id: DbId,
    #[serde(default = "default_subscription")]
    pub monthly_subscription: Decimal,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

fn default_subscription() -> Decimal {
    Decimal::new(10, 0)
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1))]
    pub token: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Returned by login: the session token plus who it belongs to.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    /// Session lifetime in seconds.
    pub expires_in: i64,
    pub user: LoginResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a customer account and its login in one transaction.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<LoginResponse>>)> {
    let login = create_account(&state, &input, ROLE_CUSTOMER).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: login })))
}

/// POST /api/v1/admin/employees
pub async fn create_employee(
    RequireEmployee(admin): RequireEmployee,
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<LoginResponse>>)> {
    let login = create_account(&state, &input, ROLE_EMPLOYEE).await?;
    tracing::info!(
        created_by = admin.login_id,
        login_id = login.id,
        "Employee account created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: login })))
}

/// POST /api/v1/auth/login
///
/// Verify credentials, stamp `last_login_at` and issue a session token in
/// both the body and the `session` cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<SessionResponse>)> {
    input.validate()?;

    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid username or password".into()));

    let login = LoginRepo::find_by_username(&state.pool, input.username.trim())
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &login.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(username = %login.username, "Failed login attempt");
        return Err(invalid());
    }

    LoginRepo::record_login(&state.pool, login.id).await?;

    let token = generate_session_token(login.id, login.account_id, &login.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let expires_in = state.config.jwt.session_expiry_secs();

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(expires_in))
        .build();

    tracing::info!(login_id = login.id, role = %login.role, "User logged in");

    let mut user = LoginResponse::from(&login);
    user.last_login_at = Some(Utc::now());

    Ok((
        jar.add(cookie),
        Json(SessionResponse {
            token,
            expires_in,
            user,
        }),
    ))
}

/// POST /api/v1/auth/logout
///
/// Sessions are stateless; logging out overwrites the cookie with an
/// expired one, whether or not the request carried it.
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let mut removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    removal.make_removal();
    (jar.add(removal), StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<LoginResponse>>> {
    let login = LoginRepo::find_by_id(&state.pool, user.login_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Login no longer exists".into()))
        })?;
    Ok(Json(DataResponse {
        data: LoginResponse::from(&login),
    }))
}

/// POST /api/v1/auth/forgot-password
///
/// Always 202, whether or not the address belongs to an account.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(input): Json<ForgotPasswordRequest>,
) -> AppResult<StatusCode> {
    input.validate()?;
    let email = input.email.trim();

    let Some(login) = LoginRepo::find_by_email(&state.pool, email).await? else {
        tracing::debug!("Password reset requested for unknown e-mail");
        return Ok(StatusCode::ACCEPTED);
    };

    let (token, token_hash) = generate_reset_token();
    PasswordResetRepo::create(
        &state.pool,
        &CreatePasswordReset {
            login_id: login.id,
            token_hash,
            expires_at: reset_token_expiry(Utc::now()),
        },
    )
    .await?;

    let link = reset_link(&state.config.public_base_url, &token);
    if let Err(e) = state.mailer.send_password_reset(email, &link).await {
        // The token stays valid; the user can request another mail.
        tracing::error!(error = %e, login_id = login.id, "Failed to send password reset email");
    }

    Ok(StatusCode::ACCEPTED)
}

/// POST /api/v1/auth/reset-password
///
/// Redeem a reset token. The token is consumed, the password replaced and
/// the login's other outstanding tokens retired in one transaction.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    input.validate()?;
    validation::validate_password_strength(&input.new_password)?;
    if input.new_password != input.confirm_password {
        return Err(CoreError::Validation("Passwords do not match".into()).into());
    }

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let redeemed = PasswordResetRepo::redeem(
        &state.pool,
        state.config.db_retry,
        &hash_reset_token(input.token.trim()),
        &password_hash,
    )
    .await?;

    match redeemed {
        Some(login_id) => {
            tracing::info!(login_id, "Password reset completed");
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err(AppError::BadRequest(
            "Reset link is invalid or has expired".into(),
        )),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate a registration form, hash the password and insert account and
/// login together.
async fn create_account(
    state: &AppState,
    input: &RegisterRequest,
    role: &str,
) -> AppResult<LoginResponse> {
    input.validate()?;
    validation::validate_email(input.email.trim())?;
    validation::validate_username(input.username.trim())?;
    validation::validate_password_strength(&input.password)?;
    validation::validate_non_negative("Monthly subscription", input.monthly_subscription)?;
    if input.password != input.confirm_password {
        return Err(CoreError::Validation("Passwords do not match".into()).into());
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let account = CreateUserAccount {
        first_name: input.first_name.trim().to_string(),
        middle_name: input
            .middle_name
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string),
        last_name: input.last_name.trim().to_string(),
        email: input.email.trim().to_string(),
        street_addr: input.street_addr.trim().to_string(),
        city: input.city.trim().to_string(),
        state: input.state.trim().to_string(),
        postal_code: input.postal_code.trim().to_string(),
        country: input.country.trim().to_string(),
        monthly_subscription: input.monthly_subscription,
        country_id: input.country_id,
    };
    let login = CreateLogin {
        account_id: 0,
        username: input.username.trim().to_string(),
        password_hash,
        role: role.to_string(),
    };

    let (account, login) =
        UserAccountRepo::register(&state.pool, state.config.db_retry, &account, &login).await?;
    tracing::info!(account_id = account.id, login_id = login.id, role, "Account registered");

    Ok(LoginResponse::from(&login))
}

