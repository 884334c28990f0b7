//! Fixed reporting queries behind the employee analytics endpoints.
//!
//! Per-series aggregates are computed in grouped subqueries and joined back
//! once, so ratings and viewer sums never multiply across each other.

use sqlx::PgPool;

use crate::models::analytics::{
    CountryViewers, LabelCount, MonthlyFeedback, ProductionHouseStats, RatingBucket,
    SeriesAboveHouseAverage, SeriesPerformance, SeriesRating, SeriesViewers, UnratedSeries,
    UserEngagement, ViewerPercentile,
};

/// Rows returned by the house and country leaderboards.
const LEADERBOARD_LIMIT: i64 = 10;

pub struct AnalyticsRepo;

impl AnalyticsRepo {
    pub async fn top_series_by_viewers(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<SeriesViewers>, sqlx::Error> {
        sqlx::query_as::<_, SeriesViewers>(
            "SELECT ws.id, ws.name, SUM(e.total_viewers)::bigint AS total_viewers
             FROM web_series ws
             JOIN episodes e ON e.web_series_id = ws.id
             GROUP BY ws.id, ws.name
             ORDER BY total_viewers DESC, ws.id
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Only series with at least one rating appear.
    pub async fn top_series_by_rating(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<SeriesRating>, sqlx::Error> {
        sqlx::query_as::<_, SeriesRating>(
            "SELECT ws.id, ws.name,
                    AVG(f.rating)::float8 AS avg_rating,
                    COUNT(f.rating) AS rating_count
             FROM web_series ws
             JOIN feedback f ON f.web_series_id = ws.id
             GROUP BY ws.id, ws.name
             HAVING COUNT(f.rating) > 0
             ORDER BY avg_rating DESC, rating_count DESC, ws.id
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Release-country counts. Countries without releases are omitted.
    pub async fn series_per_country(pool: &PgPool) -> Result<Vec<LabelCount>, sqlx::Error> {
        sqlx::query_as::<_, LabelCount>(
            "SELECT c.name AS label, COUNT(wsc.web_series_id) AS series_count
             FROM countries c
             LEFT JOIN web_series_countries wsc ON wsc.country_id = c.id
             GROUP BY c.id, c.name
             HAVING COUNT(wsc.web_series_id) > 0
             ORDER BY series_count DESC, label",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn series_per_genre(pool: &PgPool) -> Result<Vec<LabelCount>, sqlx::Error> {
        sqlx::query_as::<_, LabelCount>(
            "SELECT g.name AS label, COUNT(wsg.web_series_id) AS series_count
             FROM genres g
             LEFT JOIN web_series_genres wsg ON wsg.genre_id = g.id
             GROUP BY g.id, g.name
             HAVING COUNT(wsg.web_series_id) > 0
             ORDER BY series_count DESC, label",
        )
        .fetch_all(pool)
        .await
    }

    /// Feedback volume and mean rating per month over the last twelve
    /// months, oldest month first.
    pub async fn monthly_feedback(pool: &PgPool) -> Result<Vec<MonthlyFeedback>, sqlx::Error> {
        let mut rows = sqlx::query_as::<_, MonthlyFeedback>(
            "SELECT to_char(date_trunc('month', recorded_at), 'YYYY-MM') AS month,
                    COUNT(*) AS feedback_count,
                    AVG(rating)::float8 AS avg_rating
             FROM feedback
             WHERE recorded_at >= date_trunc('month', NOW()) - INTERVAL '11 months'
             GROUP BY date_trunc('month', recorded_at)
             ORDER BY date_trunc('month', recorded_at) DESC
             LIMIT 12",
        )
        .fetch_all(pool)
        .await?;
        rows.reverse();
        Ok(rows)
    }

    pub async fn production_house_stats(
        pool: &PgPool,
    ) -> Result<Vec<ProductionHouseStats>, sqlx::Error> {
        sqlx::query_as::<_, ProductionHouseStats>(
            "SELECT ph.id, ph.name,
                    COUNT(ws.id) AS series_count,
                    COALESCE(SUM(v.total_viewers), 0)::bigint AS total_viewers
             FROM production_houses ph
             LEFT JOIN web_series ws ON ws.production_house_id = ph.id
             LEFT JOIN (
                 SELECT web_series_id, SUM(total_viewers) AS total_viewers
                 FROM episodes GROUP BY web_series_id
             ) v ON v.web_series_id = ws.id
             GROUP BY ph.id, ph.name
             ORDER BY total_viewers DESC, series_count DESC, ph.id
             LIMIT $1",
        )
        .bind(LEADERBOARD_LIMIT)
        .fetch_all(pool)
        .await
    }

    /// Count of ratings at each star value. Always five buckets, 1 through 5.
    pub async fn rating_distribution(pool: &PgPool) -> Result<Vec<RatingBucket>, sqlx::Error> {
        let rows = sqlx::query_as::<_, RatingBucket>(
            "SELECT rating, COUNT(*) AS count
             FROM feedback
             GROUP BY rating
             ORDER BY rating",
        )
        .fetch_all(pool)
        .await?;
        Ok(fill_rating_buckets(rows))
    }

    pub async fn top_countries_by_viewers(
        pool: &PgPool,
    ) -> Result<Vec<CountryViewers>, sqlx::Error> {
        sqlx::query_as::<_, CountryViewers>(
            "SELECT c.name AS country_name, SUM(v.total_viewers)::bigint AS total_viewers
             FROM countries c
             JOIN web_series_countries wsc ON wsc.country_id = c.id
             JOIN web_series ws ON ws.id = wsc.web_series_id
             JOIN (
                 SELECT web_series_id, SUM(total_viewers) AS total_viewers
                 FROM episodes GROUP BY web_series_id
             ) v ON v.web_series_id = ws.id
             GROUP BY c.id, c.name
             ORDER BY total_viewers DESC, country_name
             LIMIT $1",
        )
        .bind(LEADERBOARD_LIMIT)
        .fetch_all(pool)
        .await
    }

    pub async fn series_performance(
        pool: &PgPool,
    ) -> Result<Vec<SeriesPerformance>, sqlx::Error> {
        sqlx::query_as::<_, SeriesPerformance>(
            "SELECT ws.id, ws.name, ws.language, ws.country_of_origin, ws.release_date,
                    ws.num_episodes, ph.name AS production_house,
                    COALESCE(r.avg_rating, 0)::float8 AS avg_rating,
                    COALESCE(r.rating_count, 0) AS rating_count,
                    COALESCE(e.total_viewers, 0)::bigint AS total_viewers,
                    COALESCE(e.episode_count, 0) AS actual_episodes
             FROM web_series ws
             JOIN production_houses ph ON ph.id = ws.production_house_id
             LEFT JOIN (
                 SELECT web_series_id, AVG(rating) AS avg_rating, COUNT(*) AS rating_count
                 FROM feedback GROUP BY web_series_id
             ) r ON r.web_series_id = ws.id
             LEFT JOIN (
                 SELECT web_series_id, SUM(total_viewers) AS total_viewers,
                        COUNT(*) AS episode_count
                 FROM episodes GROUP BY web_series_id
             ) e ON e.web_series_id = ws.id
             ORDER BY total_viewers DESC, ws.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Accounts that have left at least one piece of feedback, most active
    /// first.
    pub async fn user_engagement(pool: &PgPool) -> Result<Vec<UserEngagement>, sqlx::Error> {
        sqlx::query_as::<_, UserEngagement>(
            "SELECT ua.id AS account_id, ua.first_name, ua.last_name, ua.created_at,
                    c.name AS country_name,
                    COUNT(f.rating) AS feedback_count,
                    AVG(f.rating)::float8 AS avg_rating_given,
                    MAX(f.recorded_at) AS last_feedback_at
             FROM user_accounts ua
             LEFT JOIN countries c ON c.id = ua.country_id
             LEFT JOIN feedback f ON f.account_id = ua.id
             GROUP BY ua.id, ua.first_name, ua.last_name, ua.created_at, c.name
             HAVING COUNT(f.rating) > 0
             ORDER BY feedback_count DESC, last_feedback_at DESC, ua.id",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn viewer_percentiles(
        pool: &PgPool,
    ) -> Result<Vec<ViewerPercentile>, sqlx::Error> {
        sqlx::query_as::<_, ViewerPercentile>(
            "WITH series_viewers AS (
                 SELECT ws.id, ws.name,
                        COALESCE(SUM(e.total_viewers), 0)::bigint AS total_viewers
                 FROM web_series ws
                 LEFT JOIN episodes e ON e.web_series_id = ws.id
                 GROUP BY ws.id, ws.name
             )
             SELECT id, name, total_viewers,
                    PERCENT_RANK() OVER (ORDER BY total_viewers)::float8 AS percentile
             FROM series_viewers
             ORDER BY percentile DESC, id",
        )
        .fetch_all(pool)
        .await
    }

    /// Series whose total viewers exceed the mean of their production
    /// house's series.
    pub async fn series_above_house_average(
        pool: &PgPool,
    ) -> Result<Vec<SeriesAboveHouseAverage>, sqlx::Error> {
        sqlx::query_as::<_, SeriesAboveHouseAverage>(
            "WITH series_viewers AS (
                 SELECT ws.id, ws.name, ws.production_house_id,
                        COALESCE(SUM(e.total_viewers), 0)::bigint AS total_viewers
                 FROM web_series ws
                 LEFT JOIN episodes e ON e.web_series_id = ws.id
                 GROUP BY ws.id, ws.name, ws.production_house_id
             )
             SELECT sv.id, sv.name, ph.name AS production_house_name, sv.total_viewers,
                    (SELECT AVG(peer.total_viewers)::float8
                     FROM series_viewers peer
                     WHERE peer.production_house_id = sv.production_house_id)
                        AS house_average_viewers
             FROM series_viewers sv
             JOIN production_houses ph ON ph.id = sv.production_house_id
             WHERE sv.total_viewers > (
                 SELECT AVG(peer.total_viewers)
                 FROM series_viewers peer
                 WHERE peer.production_house_id = sv.production_house_id
             )
             ORDER BY sv.total_viewers DESC, sv.id",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn unrated_series(pool: &PgPool) -> Result<Vec<UnratedSeries>, sqlx::Error> {
        sqlx::query_as::<_, UnratedSeries>(
            "SELECT id, name FROM (
                 SELECT id, name FROM web_series
                 EXCEPT
                 SELECT ws.id, ws.name
                 FROM web_series ws
                 JOIN feedback f ON f.web_series_id = ws.id
             ) unrated
             ORDER BY name, id",
        )
        .fetch_all(pool)
        .await
    }
}

/// Expand sparse `(rating, count)` rows to exactly the five buckets 1..=5.
pub fn fill_rating_buckets(rows: Vec<RatingBucket>) -> Vec<RatingBucket> {
    (1..=5)
        .map(|rating| RatingBucket {
            rating,
            count: rows
                .iter()
                .find(|r| r.rating == rating)
                .map_or(0, |r| r.count),
        })
        .collect()
}
