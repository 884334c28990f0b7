//! Counts and recent activity for the admin dashboard.

use sqlx::PgPool;

use crate::models::dashboard::{Dashboard, DashboardCounts, RecentSeries};

pub struct DashboardRepo;

impl DashboardRepo {
    pub async fn load(pool: &PgPool) -> Result<Dashboard, sqlx::Error> {
        let counts = sqlx::query_as::<_, DashboardCounts>(
            "SELECT (SELECT COUNT(*) FROM web_series) AS series_count,
                    (SELECT COUNT(*) FROM episodes) AS episode_count,
                    (SELECT COUNT(*) FROM user_accounts) AS user_count,
                    (SELECT COUNT(*) FROM feedback) AS feedback_count,
                    (SELECT COUNT(*) FROM contracts) AS contract_count,
                    (SELECT COUNT(*) FROM producers) AS producer_count,
                    (SELECT COUNT(*) FROM production_houses) AS production_house_count",
        )
        .fetch_one(pool)
        .await?;

        let recent_series = sqlx::query_as::<_, RecentSeries>(
            "SELECT id, name, release_date FROM web_series
             ORDER BY created_at DESC, id DESC
             LIMIT 5",
        )
        .fetch_all(pool)
        .await?;

        Ok(Dashboard {
            counts,
            recent_series,
        })
    }
}
