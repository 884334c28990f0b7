//! Password-reset token material.
//!
//! The plaintext token only ever appears in the e-mailed link. The database
//! stores its SHA-256 hex digest, so a leaked table cannot be redeemed.

use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// How long a reset link stays redeemable.
pub const RESET_TOKEN_TTL_MINS: i64 = 60;

/// Returns `(plaintext, sha256_hex)`.
pub fn generate_reset_token() -> (String, String) {
    let plaintext = Uuid::new_v4().simple().to_string();
    let hash = hash_reset_token(&plaintext);
    (plaintext, hash)
}

pub fn hash_reset_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn reset_token_expiry(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::minutes(RESET_TOKEN_TTL_MINS)
}

/// Frontend link the user follows to choose a new password.
pub fn reset_link(public_base_url: &str, token: &str) -> String {
    format!("{public_base_url}/reset-password?token={token}")
}
