use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::{
    NewSlugRecord, Slug, SlugParentId, SlugRecord, SlugRecordId, SlugRepository,
};
use crate::infrastructure::repositories::error::map_sqlx;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use std::sync::Arc;

const SLUG_COLUMNS: &str = "id, parent_id, slug, is_active, created_at";
const RECENT_FIRST: &str = "ORDER BY created_at DESC, id DESC";

/// Slug records of one kind, stored in `table` (see `migrations/`). Every
/// kind table has the same shape and a `UNIQUE (slug)` constraint.
#[derive(Clone)]
pub struct SqliteSlugRepository {
    pool: Arc<SqlitePool>,
    table: &'static str,
}

impl SqliteSlugRepository {
    pub fn new(pool: Arc<SqlitePool>, table: &'static str) -> Self {
        Self { pool, table }
    }

    pub fn products(pool: Arc<SqlitePool>) -> Self {
        Self::new(pool, "product_slugs")
    }

    async fn fetch_records(&self, sql: &str, parent: SlugParentId) -> DomainResult<Vec<SlugRecord>> {
        let rows = sqlx::query_as::<_, SlugRow>(sql)
            .bind(i64::from(parent))
            .fetch_all(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(SlugRecord::try_from).collect()
    }
}

#[derive(Debug, FromRow)]
struct SlugRow {
    id: i64,
    parent_id: i64,
    slug: String,
    is_active: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<SlugRow> for SlugRecord {
    type Error = DomainError;

    fn try_from(row: SlugRow) -> Result<Self, Self::Error> {
        Ok(SlugRecord {
            id: SlugRecordId::new(row.id)?,
            parent_id: SlugParentId::new(row.parent_id)?,
            slug: Slug::new(row.slug)?,
            is_active: row.is_active != 0,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl SlugRepository for SqliteSlugRepository {
    async fn insert(&self, record: NewSlugRecord) -> DomainResult<SlugRecord> {
        let NewSlugRecord {
            parent_id,
            slug,
            is_active,
            created_at,
        } = record;

        let row = sqlx::query_as::<_, SlugRow>(&format!(
            "INSERT INTO {} (parent_id, slug, is_active, created_at) VALUES (?, ?, ?, ?) RETURNING {SLUG_COLUMNS}",
            self.table
        ))
        .bind(i64::from(parent_id))
        .bind(slug.as_str())
        .bind(i64::from(is_active))
        .bind(created_at)
        .fetch_one(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        SlugRecord::try_from(row)
    }

    async fn set_active(&self, id: SlugRecordId, is_active: bool) -> DomainResult<SlugRecord> {
        let row = sqlx::query_as::<_, SlugRow>(&format!(
            "UPDATE {} SET is_active = ? WHERE id = ? RETURNING {SLUG_COLUMNS}",
            self.table
        ))
        .bind(i64::from(is_active))
        .bind(i64::from(id))
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("slug not found".into()))?;

        SlugRecord::try_from(row)
    }

    async fn touch(&self, id: SlugRecordId, at: DateTime<Utc>) -> DomainResult<SlugRecord> {
        let row = sqlx::query_as::<_, SlugRow>(&format!(
            "UPDATE {} SET created_at = ? WHERE id = ? RETURNING {SLUG_COLUMNS}",
            self.table
        ))
        .bind(at)
        .bind(i64::from(id))
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("slug not found".into()))?;

        SlugRecord::try_from(row)
    }

    async fn slug_exists(&self, slug: &Slug) -> DomainResult<bool> {
        let exists: i64 = sqlx::query_scalar(&format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE slug = ?)",
            self.table
        ))
        .bind(slug.as_str())
        .fetch_one(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(exists != 0)
    }

    async fn find_by_id(&self, id: SlugRecordId) -> DomainResult<Option<SlugRecord>> {
        let row = sqlx::query_as::<_, SlugRow>(&format!(
            "SELECT {SLUG_COLUMNS} FROM {} WHERE id = ?",
            self.table
        ))
        .bind(i64::from(id))
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(SlugRecord::try_from).transpose()
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<SlugRecord>> {
        let row = sqlx::query_as::<_, SlugRow>(&format!(
            "SELECT {SLUG_COLUMNS} FROM {} WHERE slug = ?",
            self.table
        ))
        .bind(slug.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(SlugRecord::try_from).transpose()
    }

    async fn has_active(&self, parent: SlugParentId) -> DomainResult<bool> {
        let exists: i64 = sqlx::query_scalar(&format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE parent_id = ? AND is_active = 1)",
            self.table
        ))
        .bind(i64::from(parent))
        .fetch_one(&*self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(exists != 0)
    }

    async fn list_active(&self, parent: SlugParentId) -> DomainResult<Vec<SlugRecord>> {
        let sql = format!(
            "SELECT {SLUG_COLUMNS} FROM {} WHERE parent_id = ? AND is_active = 1 {RECENT_FIRST}",
            self.table
        );
        self.fetch_records(&sql, parent).await
    }

    async fn list_active_for_parents(
        &self,
        parents: &[SlugParentId],
    ) -> DomainResult<Vec<SlugRecord>> {
        if parents.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {SLUG_COLUMNS} FROM {} WHERE is_active = 1 AND parent_id IN (",
            self.table
        ));
        let mut separated = builder.separated(", ");
        for parent in parents {
            separated.push_bind(i64::from(*parent));
        }
        separated.push_unseparated(") ");
        builder.push(RECENT_FIRST);

        let rows = builder
            .build_query_as::<SlugRow>()
            .fetch_all(&*self.pool)
            .await
            .map_err(map_sqlx)?;

        rows.into_iter().map(SlugRecord::try_from).collect()
    }

    async fn list_by_parent(&self, parent: SlugParentId) -> DomainResult<Vec<SlugRecord>> {
        let sql = format!(
            "SELECT {SLUG_COLUMNS} FROM {} WHERE parent_id = ? {RECENT_FIRST}",
            self.table
        );
        self.fetch_records(&sql, parent).await
    }
}
