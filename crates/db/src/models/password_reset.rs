//! Password reset token model.

use serde::Serialize;
use sqlx::FromRow;
use streamvault_core::types::{DbId, Timestamp};

/// A row from the `password_resets` table. Only the token hash is stored.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PasswordReset {
    pub id: DbId,
    pub login_id: DbId,
    #[serde(skip_serializing)]
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub used: bool,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreatePasswordReset {
    pub login_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
