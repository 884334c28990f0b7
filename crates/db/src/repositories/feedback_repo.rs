//! Repository for the `feedback` table.

use sqlx::PgPool;
use streamvault_core::types::DbId;

use crate::models::catalog::RatingInfo;
use crate::models::feedback::{Feedback, FeedbackHistoryItem, Review, UpsertFeedback};

const COLUMNS: &str = "web_series_id, account_id, rating, feedback_text, recorded_at";

pub struct FeedbackRepo;

impl FeedbackRepo {
    /// Insert or replace an account's feedback on a series. The composite
    /// primary key guarantees one row per (series, account).
    pub async fn upsert(
        pool: &PgPool,
        web_series_id: DbId,
        account_id: DbId,
        input: &UpsertFeedback,
    ) -> Result<Feedback, sqlx::Error> {
        let query = format!(
            "INSERT INTO feedback (web_series_id, account_id, rating, feedback_text)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (web_series_id, account_id) DO UPDATE
             SET rating = EXCLUDED.rating,
                 feedback_text = EXCLUDED.feedback_text,
                 recorded_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(web_series_id)
            .bind(account_id)
            .bind(input.rating)
            .bind(&input.feedback_text)
            .fetch_one(pool)
            .await
    }

    pub async fn find(
        pool: &PgPool,
        web_series_id: DbId,
        account_id: DbId,
    ) -> Result<Option<Feedback>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM feedback WHERE web_series_id = $1 AND account_id = $2"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(web_series_id)
            .bind(account_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete the caller's own feedback. Returns `true` if a row was removed.
    pub async fn delete(
        pool: &PgPool,
        web_series_id: DbId,
        account_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM feedback WHERE web_series_id = $1 AND account_id = $2")
                .bind(web_series_id)
                .bind(account_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Most recent reviews of a series with reviewer names.
    pub async fn recent_reviews(
        pool: &PgPool,
        web_series_id: DbId,
        limit: i64,
    ) -> Result<Vec<Review>, sqlx::Error> {
        sqlx::query_as::<_, Review>(
            "SELECT f.rating, f.feedback_text, f.recorded_at, u.first_name, u.last_name
             FROM feedback f
             JOIN user_accounts u ON u.id = f.account_id
             WHERE f.web_series_id = $1
             ORDER BY f.recorded_at DESC
             LIMIT $2",
        )
        .bind(web_series_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// An account's feedback across all series, newest first.
    pub async fn history_for_account(
        pool: &PgPool,
        account_id: DbId,
    ) -> Result<Vec<FeedbackHistoryItem>, sqlx::Error> {
        sqlx::query_as::<_, FeedbackHistoryItem>(
            "SELECT f.web_series_id, ws.name AS web_series_name, f.rating, f.feedback_text,
                    f.recorded_at
             FROM feedback f
             JOIN web_series ws ON ws.id = f.web_series_id
             WHERE f.account_id = $1
             ORDER BY f.recorded_at DESC",
        )
        .bind(account_id)
        .fetch_all(pool)
        .await
    }

    /// Average (via `series_average_rating`) and count of ratings.
    pub async fn rating_info(pool: &PgPool, web_series_id: DbId) -> Result<RatingInfo, sqlx::Error> {
        sqlx::query_as::<_, RatingInfo>(
            "SELECT series_average_rating($1) AS avg_rating,
                    (SELECT COUNT(*) FROM feedback WHERE web_series_id = $1) AS total_ratings",
        )
        .bind(web_series_id)
        .fetch_one(pool)
        .await
    }
}
