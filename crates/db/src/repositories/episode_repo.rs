//! Repository for the `episodes` table.

use sqlx::{PgConnection, PgPool};
use streamvault_core::types::DbId;

use crate::models::episode::{CreateEpisode, Episode, EpisodeListItem, UpdateEpisode};
use crate::retry::{retry_on_deadlock, transaction_with_retry, RetryPolicy};

const COLUMNS: &str =
    "id, web_series_id, name, total_viewers, tech_interrupt, created_at, updated_at";

/// Provides CRUD operations for episodes.
pub struct EpisodeRepo;

impl EpisodeRepo {
    pub async fn create(
        pool: &PgPool,
        web_series_id: DbId,
        input: &CreateEpisode,
    ) -> Result<Episode, sqlx::Error> {
        let query = format!(
            "INSERT INTO episodes (web_series_id, name, total_viewers, tech_interrupt)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Episode>(&query)
            .bind(web_series_id)
            .bind(&input.name)
            .bind(input.total_viewers)
            .bind(input.tech_interrupt)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Episode>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM episodes WHERE id = $1");
        sqlx::query_as::<_, Episode>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Episodes of a series in insertion order.
    pub async fn list_by_series(
        pool: &PgPool,
        web_series_id: DbId,
    ) -> Result<Vec<Episode>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM episodes WHERE web_series_id = $1 ORDER BY id");
        sqlx::query_as::<_, Episode>(&query)
            .bind(web_series_id)
            .fetch_all(pool)
            .await
    }

    /// Admin listing with the number of schedule slots per episode.
    pub async fn list_with_schedule_counts(
        pool: &PgPool,
        web_series_id: DbId,
    ) -> Result<Vec<EpisodeListItem>, sqlx::Error> {
        sqlx::query_as::<_, EpisodeListItem>(
            "SELECT e.id, e.web_series_id, e.name, e.total_viewers, e.tech_interrupt,
                    (SELECT COUNT(*) FROM schedules s WHERE s.episode_id = e.id) AS schedule_count
             FROM episodes e
             WHERE e.web_series_id = $1
             ORDER BY e.id",
        )
        .bind(web_series_id)
        .fetch_all(pool)
        .await
    }

    /// Update an episode. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEpisode,
    ) -> Result<Option<Episode>, sqlx::Error> {
        let query = format!(
            "UPDATE episodes SET
                name = COALESCE($2, name),
                total_viewers = COALESCE($3, total_viewers),
                tech_interrupt = COALESCE($4, tech_interrupt)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Episode>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.total_viewers)
            .bind(input.tech_interrupt)
            .fetch_optional(pool)
            .await
    }

    /// Remove an episode and its schedule rows.
    pub async fn delete(pool: &PgPool, policy: RetryPolicy, id: DbId) -> Result<bool, sqlx::Error> {
        transaction_with_retry(pool, policy, move |conn| Box::pin(Self::delete_in(conn, id))).await
    }

    pub async fn delete_in(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query("DELETE FROM schedules WHERE episode_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        let result = sqlx::query("DELETE FROM episodes WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the viewer count through the `record_episode_viewers` procedure.
    ///
    /// The `CALL` runs as its own implicit transaction, so the whole statement
    /// is retried on deadlock. A missing episode surfaces as SQLSTATE `P0002`
    /// and a negative count as a check violation.
    pub async fn record_viewers(
        pool: &PgPool,
        policy: RetryPolicy,
        id: DbId,
        viewers: i64,
    ) -> Result<(), sqlx::Error> {
        retry_on_deadlock(policy, move || async move {
            sqlx::query("CALL record_episode_viewers($1, $2)")
                .bind(id)
                .bind(viewers)
                .execute(pool)
                .await?;
            Ok(())
        })
        .await
    }
}
