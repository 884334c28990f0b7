//! Repository for the four reference vocabularies.

use sqlx::PgPool;
use streamvault_core::types::DbId;

use crate::models::reference::{ReferenceItem, ReferenceKind};

const COLUMNS: &str = "id, name, created_at";

/// Lookup-table operations. The table is chosen by [`ReferenceKind`].
pub struct ReferenceRepo;

impl ReferenceRepo {
    /// List every entry ordered by name.
    pub async fn list(pool: &PgPool, kind: ReferenceKind) -> Result<Vec<ReferenceItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {} ORDER BY name", kind.table());
        sqlx::query_as::<_, ReferenceItem>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        kind: ReferenceKind,
        id: DbId,
    ) -> Result<Option<ReferenceItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {} WHERE id = $1", kind.table());
        sqlx::query_as::<_, ReferenceItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert an entry. Duplicate names violate the table's `uq_*_name`.
    pub async fn create(
        pool: &PgPool,
        kind: ReferenceKind,
        name: &str,
    ) -> Result<ReferenceItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} (name) VALUES ($1) RETURNING {COLUMNS}",
            kind.table()
        );
        sqlx::query_as::<_, ReferenceItem>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Delete an entry. Fails with a foreign-key violation while any series
    /// or account still references it. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, kind: ReferenceKind, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE id = $1", kind.table());
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
