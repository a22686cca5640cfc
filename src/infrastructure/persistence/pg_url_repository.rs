//! PostgreSQL implementation of url repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{UrlPatch, UrlRecord};
use crate::domain::repositories::{StoreError, UrlRepository};
use crate::utils::db_error::{is_alias_conflict, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct UrlRow {
    id: i64,
    alias: String,
    target_url: String,
    visit_count: i64,
    created_at: DateTime<Utc>,
}

impl From<UrlRow> for UrlRecord {
    fn from(r: UrlRow) -> Self {
        UrlRecord::new(r.id, r.alias, r.target_url, r.visit_count, r.created_at)
    }
}

/// PostgreSQL repository for url records.
///
/// Alias uniqueness is enforced by the `urls_alias_key` constraint; a
/// violation is reported as [`StoreError::AliasExists`] rather than a
/// generic failure.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn classify(e: sqlx::Error, alias: Option<&str>) -> StoreError {
    match alias {
        Some(alias) if is_alias_conflict(&e) => StoreError::AliasExists(alias.to_string()),
        _ => map_sqlx_error(e),
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert(&self, alias: &str, target_url: &str) -> Result<UrlRecord, StoreError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (alias, target_url)
            VALUES ($1, $2)
            RETURNING id, alias, target_url, visit_count, created_at
            "#,
        )
        .bind(alias)
        .bind(target_url)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| classify(e, Some(alias)))?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, patch: UrlPatch) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE urls
            SET alias       = COALESCE($2::TEXT, alias),
                target_url  = COALESCE($3::TEXT, target_url),
                visit_count = COALESCE($4::BIGINT, visit_count)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.alias.as_deref())
        .bind(patch.target_url.as_deref())
        .bind(patch.visit_count)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| classify(e, patch.alias.as_deref()))?;

        Ok(result.rows_affected())
    }

    async fn get_by_alias(&self, alias: &str) -> Result<Option<UrlRecord>, StoreError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, alias, target_url, visit_count, created_at
            FROM urls
            WHERE alias = $1
            "#,
        )
        .bind(alias)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(UrlRecord::from))
    }

    async fn increment_visit_count(&self, id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("UPDATE urls SET visit_count = visit_count + 1 WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }
}
