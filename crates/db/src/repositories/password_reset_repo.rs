//! Repository for the `password_resets` table.

use sqlx::{PgConnection, PgPool};
use streamvault_core::types::DbId;

use crate::models::password_reset::{CreatePasswordReset, PasswordReset};
use crate::repositories::LoginRepo;
use crate::retry::{transaction_with_retry, RetryPolicy};

const COLUMNS: &str = "id, login_id, token_hash, expires_at, used, created_at";

pub struct PasswordResetRepo;

impl PasswordResetRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreatePasswordReset,
    ) -> Result<PasswordReset, sqlx::Error> {
        let query = format!(
            "INSERT INTO password_resets (login_id, token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PasswordReset>(&query)
            .bind(input.login_id)
            .bind(&input.token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_login(
        pool: &PgPool,
        login_id: DbId,
    ) -> Result<Vec<PasswordReset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM password_resets WHERE login_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, PasswordReset>(&query)
            .bind(login_id)
            .fetch_all(pool)
            .await
    }

    /// Mark a live token as used and return its login id. `None` when the
    /// token is unknown, already used or expired. The conditional update makes
    /// two concurrent redemptions of the same token impossible.
    pub async fn consume_in(
        conn: &mut PgConnection,
        token_hash: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "UPDATE password_resets SET used = true
             WHERE token_hash = $1 AND used = false AND expires_at > NOW()
             RETURNING login_id",
        )
        .bind(token_hash)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row.map(|(login_id,)| login_id))
    }

    /// Retire every outstanding token of a login.
    pub async fn invalidate_for_login_in(
        conn: &mut PgConnection,
        login_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE password_resets SET used = true WHERE login_id = $1 AND used = false",
        )
        .bind(login_id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Redeem a token: consume it, store the new password hash and retire the
    /// login's other tokens, all in one transaction. Returns the login id, or
    /// `None` if the token was not redeemable.
    pub async fn redeem(
        pool: &PgPool,
        policy: RetryPolicy,
        token_hash: &str,
        new_password_hash: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let token_hash = token_hash.to_string();
        let new_password_hash = new_password_hash.to_string();
        transaction_with_retry(pool, policy, move |conn| {
            let token_hash = token_hash.clone();
            let new_password_hash = new_password_hash.clone();
            Box::pin(async move {
                let Some(login_id) = Self::consume_in(&mut *conn, &token_hash).await? else {
                    return Ok(None);
                };
                LoginRepo::update_password_in(&mut *conn, login_id, &new_password_hash).await?;
                Self::invalidate_for_login_in(&mut *conn, login_id).await?;
                Ok(Some(login_id))
            })
        })
        .await
    }
}
