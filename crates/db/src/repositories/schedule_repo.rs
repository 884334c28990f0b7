//! Repository for the `schedules` table.

use sqlx::PgPool;
use streamvault_core::types::DbId;

use crate::models::schedule::{CreateSchedule, Schedule};

const COLUMNS: &str = "id, episode_id, start_at, end_at, created_at";

pub struct ScheduleRepo;

impl ScheduleRepo {
    pub async fn create(
        pool: &PgPool,
        episode_id: DbId,
        input: &CreateSchedule,
    ) -> Result<Schedule, sqlx::Error> {
        let query = format!(
            "INSERT INTO schedules (episode_id, start_at, end_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Schedule>(&query)
            .bind(episode_id)
            .bind(input.start_at)
            .bind(input.end_at)
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_episode(
        pool: &PgPool,
        episode_id: DbId,
    ) -> Result<Vec<Schedule>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM schedules WHERE episode_id = $1 ORDER BY start_at");
        sqlx::query_as::<_, Schedule>(&query)
            .bind(episode_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
