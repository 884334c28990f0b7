//! Repository for the `producers` table.

use sqlx::{PgConnection, PgPool};
use streamvault_core::types::DbId;

use crate::models::producer::{CreateProducer, Producer, ProducerListItem, UpdateProducer};
use crate::retry::{transaction_with_retry, RetryPolicy};

const COLUMNS: &str = "id, first_name, middle_name, last_name, street_addr, city, state, \
                       postal_code, country, phone_number, email, created_at, updated_at";

/// Provides CRUD operations for producers.
pub struct ProducerRepo;

impl ProducerRepo {
    pub async fn create(pool: &PgPool, input: &CreateProducer) -> Result<Producer, sqlx::Error> {
        let query = format!(
            "INSERT INTO producers
                (first_name, middle_name, last_name, street_addr, city, state,
                 postal_code, country, phone_number, email)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Producer>(&query)
            .bind(&input.first_name)
            .bind(&input.middle_name)
            .bind(&input.last_name)
            .bind(&input.street_addr)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.postal_code)
            .bind(&input.country)
            .bind(&input.phone_number)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Producer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM producers WHERE id = $1");
        sqlx::query_as::<_, Producer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List producers by last name with their alliance count.
    pub async fn list(pool: &PgPool) -> Result<Vec<ProducerListItem>, sqlx::Error> {
        sqlx::query_as::<_, ProducerListItem>(
            "SELECT p.id, p.first_name, p.middle_name, p.last_name, p.city, p.country,
                    p.phone_number, p.email,
                    (SELECT COUNT(*) FROM producer_production_houses pph
                      WHERE pph.producer_id = p.id) AS house_count
             FROM producers p
             ORDER BY p.last_name, p.first_name, p.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a producer. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProducer,
    ) -> Result<Option<Producer>, sqlx::Error> {
        let query = format!(
            "UPDATE producers SET
                first_name = COALESCE($2, first_name),
                middle_name = COALESCE($3, middle_name),
                last_name = COALESCE($4, last_name),
                street_addr = COALESCE($5, street_addr),
                city = COALESCE($6, city),
                state = COALESCE($7, state),
                postal_code = COALESCE($8, postal_code),
                country = COALESCE($9, country),
                phone_number = COALESCE($10, phone_number),
                email = COALESCE($11, email)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Producer>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.middle_name)
            .bind(&input.last_name)
            .bind(&input.street_addr)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.postal_code)
            .bind(&input.country)
            .bind(&input.phone_number)
            .bind(&input.email)
            .fetch_optional(pool)
            .await
    }

    /// Remove a producer together with their alliances.
    pub async fn delete(pool: &PgPool, policy: RetryPolicy, id: DbId) -> Result<bool, sqlx::Error> {
        transaction_with_retry(pool, policy, move |conn| Box::pin(Self::delete_in(conn, id))).await
    }

    pub async fn delete_in(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query("DELETE FROM producer_production_houses WHERE producer_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        let result = sqlx::query("DELETE FROM producers WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
