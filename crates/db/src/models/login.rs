//! Login credential model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamvault_core::types::{DbId, Timestamp};

/// Full row from the `logins` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`LoginResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Login {
    pub id: DbId,
    pub account_id: DbId,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe login representation (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub id: DbId,
    pub account_id: DbId,
    pub username: String,
    pub role: String,
    pub last_login_at: Option<Timestamp>,
}

impl From<&Login> for LoginResponse {
    fn from(login: &Login) -> Self {
        Self {
            id: login.id,
            account_id: login.account_id,
            username: login.username.clone(),
            role: login.role.clone(),
            last_login_at: login.last_login_at,
        }
    }
}

/// DTO for inserting a login. The caller hashes the password.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLogin {
    pub account_id: DbId,
    pub username: String,
    pub password_hash: String,
    pub role: String,
}
