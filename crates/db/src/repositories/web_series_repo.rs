//! Repository for the `web_series` table and its junction tables
//! (`web_series_genres`, `web_series_countries`, `web_series_dubbing`,
//! `web_series_subtitles`).

use sqlx::{PgConnection, PgPool};
use streamvault_core::types::DbId;

use crate::models::web_series::{
    CountryRelease, CreateWebSeries, SeriesLinks, UpdateWebSeries, WebSeries, WebSeriesListItem,
    WebSeriesWithLinks,
};
use crate::retry::{transaction_with_retry, RetryPolicy};

const COLUMNS: &str = "id, name, num_episodes, language, release_date, country_of_origin, \
                       image_url, production_house_id, created_at, updated_at";

/// Provides CRUD operations for web series.
pub struct WebSeriesRepo;

impl WebSeriesRepo {
    /// Insert a series and all of its junction rows in one retried
    /// transaction.
    pub async fn create(
        pool: &PgPool,
        policy: RetryPolicy,
        input: &CreateWebSeries,
    ) -> Result<WebSeries, sqlx::Error> {
        let input = input.clone();
        transaction_with_retry(pool, policy, move |conn| {
            let input = input.clone();
            Box::pin(async move { Self::create_in(conn, &input).await })
        })
        .await
    }

    pub async fn create_in(
        conn: &mut PgConnection,
        input: &CreateWebSeries,
    ) -> Result<WebSeries, sqlx::Error> {
        let query = format!(
            "INSERT INTO web_series
                (name, num_episodes, language, release_date, country_of_origin,
                 image_url, production_house_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let series = sqlx::query_as::<_, WebSeries>(&query)
            .bind(&input.name)
            .bind(input.num_episodes)
            .bind(&input.language)
            .bind(input.release_date)
            .bind(&input.country_of_origin)
            .bind(&input.image_url)
            .bind(input.production_house_id)
            .fetch_one(&mut *conn)
            .await?;

        Self::set_links_in(&mut *conn, series.id, &input.links).await?;
        Ok(series)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WebSeries>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM web_series WHERE id = $1");
        sqlx::query_as::<_, WebSeries>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Series row plus the ids of every junction row.
    pub async fn find_with_links(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WebSeriesWithLinks>, sqlx::Error> {
        let Some(series) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let links = Self::links(pool, id).await?;
        Ok(Some(WebSeriesWithLinks { series, links }))
    }

    /// Admin listing, newest release first.
    pub async fn list(pool: &PgPool) -> Result<Vec<WebSeriesListItem>, sqlx::Error> {
        sqlx::query_as::<_, WebSeriesListItem>(
            "SELECT ws.id, ws.name, ws.num_episodes, ws.language, ws.release_date,
                    ws.country_of_origin, ws.production_house_id,
                    ph.name AS production_house_name
             FROM web_series ws
             JOIN production_houses ph ON ph.id = ws.production_house_id
             ORDER BY ws.release_date DESC, ws.id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Update scalar fields and, when `input.links` is present, replace every
    /// junction row. Returns `None` if the series does not exist.
    pub async fn update(
        pool: &PgPool,
        policy: RetryPolicy,
        id: DbId,
        input: &UpdateWebSeries,
    ) -> Result<Option<WebSeries>, sqlx::Error> {
        let input = input.clone();
        transaction_with_retry(pool, policy, move |conn| {
            let input = input.clone();
            Box::pin(async move { Self::update_in(conn, id, &input).await })
        })
        .await
    }

    pub async fn update_in(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateWebSeries,
    ) -> Result<Option<WebSeries>, sqlx::Error> {
        let query = format!(
            "UPDATE web_series SET
                name = COALESCE($2, name),
                num_episodes = COALESCE($3, num_episodes),
                language = COALESCE($4, language),
                release_date = COALESCE($5, release_date),
                country_of_origin = COALESCE($6, country_of_origin),
                image_url = COALESCE($7, image_url),
                production_house_id = COALESCE($8, production_house_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, WebSeries>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.num_episodes)
            .bind(&input.language)
            .bind(input.release_date)
            .bind(&input.country_of_origin)
            .bind(&input.image_url)
            .bind(input.production_house_id)
            .fetch_optional(&mut *conn)
            .await?;

        if let (Some(_), Some(links)) = (&updated, &input.links) {
            Self::set_links_in(&mut *conn, id, links).await?;
        }
        Ok(updated)
    }

    /// Plain delete. Fails with a foreign-key violation while episodes,
    /// contracts, feedback or junction rows reference the series.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM web_series WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a series and everything that references it, in one retried
    /// transaction. Returns `true` if the series existed.
    pub async fn delete_with_dependents(
        pool: &PgPool,
        policy: RetryPolicy,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        transaction_with_retry(pool, policy, move |conn| {
            Box::pin(Self::delete_with_dependents_in(conn, id))
        })
        .await
    }

    /// Children are removed leaf-first: junction rows, feedback, schedules,
    /// episodes, contracts, then the series itself.
    pub async fn delete_with_dependents_in(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        Self::clear_links_in(&mut *conn, id).await?;

        sqlx::query("DELETE FROM feedback WHERE web_series_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        sqlx::query(
            "DELETE FROM schedules
             WHERE episode_id IN (SELECT id FROM episodes WHERE web_series_id = $1)",
        )
        .bind(id)
        .execute(&mut *conn)
        .await?;
        sqlx::query("DELETE FROM episodes WHERE web_series_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        sqlx::query("DELETE FROM contracts WHERE web_series_id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        let result = sqlx::query("DELETE FROM web_series WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        tracing::debug!(
            web_series_id = id,
            deleted = result.rows_affected(),
            "Series removed with dependents"
        );
        Ok(result.rows_affected() > 0)
    }

    /// Current junction rows of a series.
    pub async fn links(pool: &PgPool, id: DbId) -> Result<SeriesLinks, sqlx::Error> {
        let genre_ids: Vec<(DbId,)> = sqlx::query_as(
            "SELECT genre_id FROM web_series_genres WHERE web_series_id = $1 ORDER BY genre_id",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let countries = sqlx::query_as::<_, CountryRelease>(
            "SELECT country_id, release_date FROM web_series_countries
             WHERE web_series_id = $1
             ORDER BY release_date, country_id",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let dubbing: Vec<(DbId,)> = sqlx::query_as(
            "SELECT dubbing_language_id FROM web_series_dubbing
             WHERE web_series_id = $1 ORDER BY dubbing_language_id",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let subtitles: Vec<(DbId,)> = sqlx::query_as(
            "SELECT subtitle_language_id FROM web_series_subtitles
             WHERE web_series_id = $1 ORDER BY subtitle_language_id",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        Ok(SeriesLinks {
            genre_ids: genre_ids.into_iter().map(|(id,)| id).collect(),
            countries,
            dubbing_language_ids: dubbing.into_iter().map(|(id,)| id).collect(),
            subtitle_language_ids: subtitles.into_iter().map(|(id,)| id).collect(),
        })
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Replace every junction row of a series within an open transaction.
    async fn set_links_in(
        conn: &mut PgConnection,
        id: DbId,
        links: &SeriesLinks,
    ) -> Result<(), sqlx::Error> {
        Self::clear_links_in(&mut *conn, id).await?;

        for &genre_id in &links.genre_ids {
            sqlx::query(
                "INSERT INTO web_series_genres (web_series_id, genre_id) VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(id)
            .bind(genre_id)
            .execute(&mut *conn)
            .await?;
        }

        for release in &links.countries {
            sqlx::query(
                "INSERT INTO web_series_countries (web_series_id, country_id, release_date)
                 VALUES ($1, $2, $3)
                 ON CONFLICT (web_series_id, country_id)
                 DO UPDATE SET release_date = EXCLUDED.release_date",
            )
            .bind(id)
            .bind(release.country_id)
            .bind(release.release_date)
            .execute(&mut *conn)
            .await?;
        }

        for &lang_id in &links.dubbing_language_ids {
            sqlx::query(
                "INSERT INTO web_series_dubbing (web_series_id, dubbing_language_id)
                 VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(id)
            .bind(lang_id)
            .execute(&mut *conn)
            .await?;
        }

        for &lang_id in &links.subtitle_language_ids {
            sqlx::query(
                "INSERT INTO web_series_subtitles (web_series_id, subtitle_language_id)
                 VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(id)
            .bind(lang_id)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }

    async fn clear_links_in(conn: &mut PgConnection, id: DbId) -> Result<(), sqlx::Error> {
        for table in [
            "web_series_genres",
            "web_series_countries",
            "web_series_dubbing",
            "web_series_subtitles",
        ] {
            sqlx::query(&format!("DELETE FROM {table} WHERE web_series_id = $1"))
                .bind(id)
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }
}
