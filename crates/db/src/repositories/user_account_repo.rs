//! Repository for the `user_accounts` table, including atomic registration
//! of an account with its login.

use sqlx::{PgConnection, PgPool};
use streamvault_core::types::DbId;

use crate::models::login::{CreateLogin, Login};
use crate::models::user_account::{
    AccountProfile, CreateUserAccount, UpdateUserAccount, UserAccount,
};
use crate::repositories::LoginRepo;
use crate::retry::{transaction_with_retry, RetryPolicy};

const COLUMNS: &str = "id, first_name, middle_name, last_name, email, street_addr, city, \
                       state, postal_code, country, monthly_subscription, country_id, \
                       created_at, updated_at";

/// Provides CRUD operations for user accounts.
pub struct UserAccountRepo;

impl UserAccountRepo {
    pub async fn create_in(
        conn: &mut PgConnection,
        input: &CreateUserAccount,
    ) -> Result<UserAccount, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_accounts
                (first_name, middle_name, last_name, email, street_addr, city, state,
                 postal_code, country, monthly_subscription, country_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserAccount>(&query)
            .bind(&input.first_name)
            .bind(&input.middle_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.street_addr)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.postal_code)
            .bind(&input.country)
            .bind(input.monthly_subscription)
            .bind(input.country_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Create an account and its login in one transaction. If either insert
    /// fails (duplicate e-mail or username, unknown country) neither row is
    /// kept.
    ///
    /// `login.account_id` is ignored and replaced with the new account's id.
    pub async fn register(
        pool: &PgPool,
        policy: RetryPolicy,
        account: &CreateUserAccount,
        login: &CreateLogin,
    ) -> Result<(UserAccount, Login), sqlx::Error> {
        let account = account.clone();
        let login = login.clone();
        transaction_with_retry(pool, policy, move |conn| {
            let account = account.clone();
            let mut login = login.clone();
            Box::pin(async move {
                let created = Self::create_in(&mut *conn, &account).await?;
                login.account_id = created.id;
                let credentials = LoginRepo::create_in(&mut *conn, &login).await?;
                Ok((created, credentials))
            })
        })
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<UserAccount>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_accounts WHERE id = $1");
        sqlx::query_as::<_, UserAccount>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Account with its country name, for the profile page.
    pub async fn profile(pool: &PgPool, id: DbId) -> Result<Option<AccountProfile>, sqlx::Error> {
        sqlx::query_as::<_, AccountProfile>(
            "SELECT u.id, u.first_name, u.middle_name, u.last_name, u.email, u.street_addr,
                    u.city, u.state, u.postal_code, u.country, u.monthly_subscription,
                    u.country_id, c.name AS country_name, u.created_at
             FROM user_accounts u
             LEFT JOIN countries c ON c.id = u.country_id
             WHERE u.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Update address and subscription. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUserAccount,
    ) -> Result<Option<UserAccount>, sqlx::Error> {
        let query = format!(
            "UPDATE user_accounts SET
                street_addr = COALESCE($2, street_addr),
                city = COALESCE($3, city),
                state = COALESCE($4, state),
                postal_code = COALESCE($5, postal_code),
                country = COALESCE($6, country),
                country_id = COALESCE($7, country_id),
                monthly_subscription = COALESCE($8, monthly_subscription)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserAccount>(&query)
            .bind(id)
            .bind(&input.street_addr)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.postal_code)
            .bind(&input.country)
            .bind(input.country_id)
            .bind(input.monthly_subscription)
            .fetch_optional(pool)
            .await
    }
}
