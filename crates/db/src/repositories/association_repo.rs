//! Repository for the `producer_production_houses` junction table.

use sqlx::PgPool;
use streamvault_core::types::DbId;

use crate::models::association::{Association, AssociationDetail, CreateAssociation};

const COLUMNS: &str = "producer_id, production_house_id, alliance_date, end_date, created_at";

pub struct AssociationRepo;

impl AssociationRepo {
    /// Record an alliance. A second alliance for the same pair violates the
    /// primary key; an end date on or before the alliance date violates
    /// `ck_pph_end_after_alliance`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAssociation,
    ) -> Result<Association, sqlx::Error> {
        let query = format!(
            "INSERT INTO producer_production_houses
                (producer_id, production_house_id, alliance_date, end_date)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Association>(&query)
            .bind(input.producer_id)
            .bind(input.production_house_id)
            .bind(input.alliance_date)
            .bind(input.end_date)
            .fetch_one(pool)
            .await
    }

    /// All alliances, newest first, with display names.
    pub async fn list(pool: &PgPool) -> Result<Vec<AssociationDetail>, sqlx::Error> {
        sqlx::query_as::<_, AssociationDetail>(
            "SELECT pph.producer_id, pph.production_house_id, pph.alliance_date, pph.end_date,
                    p.first_name AS producer_first_name,
                    p.last_name AS producer_last_name,
                    ph.name AS production_house_name
             FROM producer_production_houses pph
             JOIN producers p ON p.id = pph.producer_id
             JOIN production_houses ph ON ph.id = pph.production_house_id
             ORDER BY pph.alliance_date DESC, pph.producer_id, pph.production_house_id",
        )
        .fetch_all(pool)
        .await
    }

    /// Returns `true` if the alliance existed.
    pub async fn delete(
        pool: &PgPool,
        producer_id: DbId,
        production_house_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM producer_production_houses
             WHERE producer_id = $1 AND production_house_id = $2",
        )
        .bind(producer_id)
        .bind(production_house_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
