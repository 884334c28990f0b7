//! Repository for the `logins` table.

use sqlx::{PgConnection, PgPool};
use streamvault_core::types::DbId;

use crate::models::login::{CreateLogin, Login};

const COLUMNS: &str = "id, account_id, username, password_hash, role, last_login_at, \
                       created_at, updated_at";

/// Provides credential lookups and updates.
pub struct LoginRepo;

impl LoginRepo {
    pub async fn create_in(
        conn: &mut PgConnection,
        input: &CreateLogin,
    ) -> Result<Login, sqlx::Error> {
        let query = format!(
            "INSERT INTO logins (account_id, username, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Login>(&query)
            .bind(input.account_id)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(&mut *conn)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Login>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM logins WHERE id = $1");
        sqlx::query_as::<_, Login>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a login by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Login>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM logins WHERE username = $1");
        sqlx::query_as::<_, Login>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find the login attached to the account with this e-mail address.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Login>, sqlx::Error> {
        sqlx::query_as::<_, Login>(
            "SELECT l.id, l.account_id, l.username, l.password_hash, l.role, l.last_login_at,
                    l.created_at, l.updated_at
             FROM logins l
             JOIN user_accounts u ON u.id = l.account_id
             WHERE u.email = $1",
        )
        .bind(email)
        .fetch_optional(pool)
        .await
    }

    /// Stamp `last_login_at` with the current time.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE logins SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Replace the password hash. Returns `true` if the row was updated.
    pub async fn update_password_in(
        conn: &mut PgConnection,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE logins SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a login. Its reset tokens go with it (`ON DELETE CASCADE`).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM logins WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
