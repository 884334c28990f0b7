//! Customer-facing catalogue reads: filtered browse and the series detail
//! aggregate.

use sqlx::PgPool;
use streamvault_core::types::DbId;

use crate::models::catalog::{
    CatalogEntry, CatalogFacets, CatalogFilter, ReleaseCountry, SeriesDetail, SeriesHeader,
};
use crate::repositories::{EpisodeRepo, FeedbackRepo};

/// Page size for [`CatalogRepo::browse`].
pub const CATALOG_PAGE_SIZE: i64 = 10;

/// Number of reviews shown on the detail page.
pub const RECENT_REVIEW_LIMIT: i64 = 10;

/// Shared predicate for browse and count. Each filter is skipped when its
/// parameter is NULL.
const FILTER: &str = "($1::BIGINT IS NULL OR ws.id IN (
                          SELECT wsg.web_series_id FROM web_series_genres wsg
                          WHERE wsg.genre_id = $1))
                      AND ($2::TEXT IS NULL OR ws.language = $2)
                      AND ($3::TEXT IS NULL OR ws.country_of_origin = $3)
                      AND ($4::TEXT IS NULL OR ws.name ILIKE '%' || $4 || '%' ESCAPE '\\')";

pub struct CatalogRepo;

impl CatalogRepo {
    /// One page of series ordered by average rating, then total viewers.
    /// Returns the page and the total number of matching series.
    ///
    /// `page` is 1-based; values below 1 are treated as 1. The offset
    /// saturates, so an absurd page is simply past the end.
    pub async fn browse(
        pool: &PgPool,
        filter: &CatalogFilter,
        page: i64,
    ) -> Result<(Vec<CatalogEntry>, i64), sqlx::Error> {
        let offset = (page.max(1) - 1).saturating_mul(CATALOG_PAGE_SIZE);
        let search = filter.q.as_deref().map(escape_like);

        let query = format!(
            "SELECT ws.id, ws.name, ws.language, ws.country_of_origin, ws.release_date,
                    ws.num_episodes, ws.image_url,
                    ph.name AS production_house,
                    COALESCE(r.avg_rating, 0)::float8 AS avg_rating,
                    COALESCE(r.rating_count, 0) AS rating_count,
                    COALESCE(v.total_viewers, 0) AS total_viewers,
                    g.genres
             FROM web_series ws
             JOIN production_houses ph ON ph.id = ws.production_house_id
             LEFT JOIN (
                 SELECT web_series_id, AVG(rating)::float8 AS avg_rating,
                        COUNT(*) AS rating_count
                 FROM feedback GROUP BY web_series_id
             ) r ON r.web_series_id = ws.id
             LEFT JOIN (
                 SELECT web_series_id, SUM(total_viewers)::bigint AS total_viewers
                 FROM episodes GROUP BY web_series_id
             ) v ON v.web_series_id = ws.id
             LEFT JOIN (
                 SELECT wsg.web_series_id, string_agg(gn.name, ', ' ORDER BY gn.name) AS genres
                 FROM web_series_genres wsg
                 JOIN genres gn ON gn.id = wsg.genre_id
                 GROUP BY wsg.web_series_id
             ) g ON g.web_series_id = ws.id
             WHERE {FILTER}
             ORDER BY avg_rating DESC, total_viewers DESC, ws.id
             LIMIT $5 OFFSET $6"
        );
        let entries = sqlx::query_as::<_, CatalogEntry>(&query)
            .bind(filter.genre_id)
            .bind(&filter.language)
            .bind(&filter.country)
            .bind(&search)
            .bind(CATALOG_PAGE_SIZE)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM web_series ws WHERE {FILTER}");
        let (total,): (i64,) = sqlx::query_as(&count_query)
            .bind(filter.genre_id)
            .bind(&filter.language)
            .bind(&filter.country)
            .bind(&search)
            .fetch_one(pool)
            .await?;

        Ok((entries, total))
    }

    /// Distinct languages and origin countries present in the catalogue.
    pub async fn facets(pool: &PgPool) -> Result<CatalogFacets, sqlx::Error> {
        let languages: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT language FROM web_series ORDER BY language")
                .fetch_all(pool)
                .await?;
        let countries: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT country_of_origin FROM web_series ORDER BY country_of_origin",
        )
        .fetch_all(pool)
        .await?;

        Ok(CatalogFacets {
            languages: languages.into_iter().map(|(l,)| l).collect(),
            countries: countries.into_iter().map(|(c,)| c).collect(),
        })
    }

    /// Full detail of one series. `viewer` is the caller's account id, used
    /// to attach their own feedback.
    pub async fn detail(
        pool: &PgPool,
        id: DbId,
        viewer: Option<DbId>,
    ) -> Result<Option<SeriesDetail>, sqlx::Error> {
        let header = sqlx::query_as::<_, SeriesHeader>(
            "SELECT ws.id, ws.name, ws.num_episodes, ws.language, ws.release_date,
                    ws.country_of_origin, ws.image_url, ws.production_house_id,
                    ph.name AS production_house_name,
                    ph.city AS production_house_city,
                    ph.country AS production_house_country,
                    ph.year_established
             FROM web_series ws
             JOIN production_houses ph ON ph.id = ws.production_house_id
             WHERE ws.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        let Some(series) = header else {
            return Ok(None);
        };

        let episodes = EpisodeRepo::list_by_series(pool, id).await?;
        let genres = Self::names(
            pool,
            "SELECT g.name FROM web_series_genres wsg
             JOIN genres g ON g.id = wsg.genre_id
             WHERE wsg.web_series_id = $1 ORDER BY g.name",
            id,
        )
        .await?;
        let dubbing_languages = Self::names(
            pool,
            "SELECT d.name FROM web_series_dubbing wsd
             JOIN dubbing_languages d ON d.id = wsd.dubbing_language_id
             WHERE wsd.web_series_id = $1 ORDER BY d.name",
            id,
        )
        .await?;
        let subtitle_languages = Self::names(
            pool,
            "SELECT s.name FROM web_series_subtitles wss
             JOIN subtitle_languages s ON s.id = wss.subtitle_language_id
             WHERE wss.web_series_id = $1 ORDER BY s.name",
            id,
        )
        .await?;
        let release_countries = sqlx::query_as::<_, ReleaseCountry>(
            "SELECT c.name AS country_name, wsc.release_date
             FROM web_series_countries wsc
             JOIN countries c ON c.id = wsc.country_id
             WHERE wsc.web_series_id = $1
             ORDER BY wsc.release_date, c.name",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;

        let rating = FeedbackRepo::rating_info(pool, id).await?;
        let total_viewers = episodes.iter().map(|e| e.total_viewers).sum();
        let reviews = FeedbackRepo::recent_reviews(pool, id, RECENT_REVIEW_LIMIT).await?;
        let my_feedback = match viewer {
            Some(account_id) => FeedbackRepo::find(pool, id, account_id).await?,
            None => None,
        };

        Ok(Some(SeriesDetail {
            series,
            episodes,
            genres,
            dubbing_languages,
            subtitle_languages,
            release_countries,
            rating,
            total_viewers,
            reviews,
            my_feedback,
        }))
    }

    async fn names(pool: &PgPool, query: &str, id: DbId) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(query).bind(id).fetch_all(pool).await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }
}

/// Escape `%`, `_` and `\` so user search text is matched literally by
/// `ILIKE ... ESCAPE '\'`.
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_leaves_plain_text_alone() {
        assert_eq!(escape_like("Stranger Things"), "Stranger Things");
    }

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("100%_real\\"), "100\\%\\_real\\\\");
    }
}
