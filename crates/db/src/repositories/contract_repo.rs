//! Repository for the `contracts` table.

use sqlx::PgPool;
use streamvault_core::types::DbId;

use crate::models::contract::{Contract, ContractListItem, CreateContract, UpdateContract};

const COLUMNS: &str =
    "id, web_series_id, per_episode_charge, start_date, end_date, created_at, updated_at";

/// Provides CRUD operations for contracts.
pub struct ContractRepo;

impl ContractRepo {
    pub async fn create(pool: &PgPool, input: &CreateContract) -> Result<Contract, sqlx::Error> {
        let query = format!(
            "INSERT INTO contracts (web_series_id, per_episode_charge, start_date, end_date)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(input.web_series_id)
            .bind(input.per_episode_charge)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contracts WHERE id = $1");
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All contracts, latest start first, with the series name.
    pub async fn list(pool: &PgPool) -> Result<Vec<ContractListItem>, sqlx::Error> {
        sqlx::query_as::<_, ContractListItem>(
            "SELECT c.id, c.web_series_id, ws.name AS web_series_name, c.per_episode_charge,
                    c.start_date, c.end_date
             FROM contracts c
             JOIN web_series ws ON ws.id = c.web_series_id
             ORDER BY c.start_date DESC, c.id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a contract. Only non-`None` fields are applied; the date-order
    /// check is evaluated against the merged row.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateContract,
    ) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!(
            "UPDATE contracts SET
                web_series_id = COALESCE($2, web_series_id),
                per_episode_charge = COALESCE($3, per_episode_charge),
                start_date = COALESCE($4, start_date),
                end_date = COALESCE($5, end_date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .bind(input.web_series_id)
            .bind(input.per_episode_charge)
            .bind(input.start_date)
            .bind(input.end_date)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contracts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
