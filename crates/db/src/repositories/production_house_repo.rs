//! Repository for the `production_houses` table.

use sqlx::{PgConnection, PgPool};
use streamvault_core::types::DbId;

use crate::models::production_house::{
    CreateProductionHouse, ProductionHouse, ProductionHouseListItem, UpdateProductionHouse,
};
use crate::retry::{transaction_with_retry, RetryPolicy};

const COLUMNS: &str = "id, name, street_addr, city, state, postal_code, country, \
                       year_established, created_at, updated_at";

/// Result of [`ProductionHouseRepo::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HouseDeleteOutcome {
    Deleted,
    NotFound,
    /// Refused: this many series still belong to the house.
    HasSeries(i64),
}

/// Provides CRUD operations for production houses.
pub struct ProductionHouseRepo;

impl ProductionHouseRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateProductionHouse,
    ) -> Result<ProductionHouse, sqlx::Error> {
        let query = format!(
            "INSERT INTO production_houses
                (name, street_addr, city, state, postal_code, country, year_established)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductionHouse>(&query)
            .bind(&input.name)
            .bind(&input.street_addr)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.postal_code)
            .bind(&input.country)
            .bind(input.year_established)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProductionHouse>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM production_houses WHERE id = $1");
        sqlx::query_as::<_, ProductionHouse>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List houses by name with series and producer counts.
    pub async fn list(pool: &PgPool) -> Result<Vec<ProductionHouseListItem>, sqlx::Error> {
        sqlx::query_as::<_, ProductionHouseListItem>(
            "SELECT ph.id, ph.name, ph.city, ph.country, ph.year_established,
                    (SELECT COUNT(*) FROM web_series ws
                      WHERE ws.production_house_id = ph.id) AS series_count,
                    (SELECT COUNT(*) FROM producer_production_houses pph
                      WHERE pph.production_house_id = ph.id) AS producer_count
             FROM production_houses ph
             ORDER BY ph.name, ph.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a production house. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProductionHouse,
    ) -> Result<Option<ProductionHouse>, sqlx::Error> {
        let query = format!(
            "UPDATE production_houses SET
                name = COALESCE($2, name),
                street_addr = COALESCE($3, street_addr),
                city = COALESCE($4, city),
                state = COALESCE($5, state),
                postal_code = COALESCE($6, postal_code),
                country = COALESCE($7, country),
                year_established = COALESCE($8, year_established)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductionHouse>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.street_addr)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.postal_code)
            .bind(&input.country)
            .bind(input.year_established)
            .fetch_optional(pool)
            .await
    }

    /// Delete a house and its alliances, unless series still reference it.
    pub async fn delete(
        pool: &PgPool,
        policy: RetryPolicy,
        id: DbId,
    ) -> Result<HouseDeleteOutcome, sqlx::Error> {
        transaction_with_retry(pool, policy, move |conn| Box::pin(Self::delete_in(conn, id))).await
    }

    pub async fn delete_in(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<HouseDeleteOutcome, sqlx::Error> {
        let (series_count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM web_series WHERE production_house_id = $1")
                .bind(id)
                .fetch_one(&mut *conn)
                .await?;
        if series_count > 0 {
            return Ok(HouseDeleteOutcome::HasSeries(series_count));
        }

        sqlx::query("DELETE FROM producer_production_houses WHERE production_house_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        let result = sqlx::query("DELETE FROM production_houses WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(if result.rows_affected() > 0 {
            HouseDeleteOutcome::Deleted
        } else {
            HouseDeleteOutcome::NotFound
        })
    }
}
