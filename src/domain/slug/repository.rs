use crate::domain::errors::DomainResult;
use crate::domain::slug::entity::{NewSlugRecord, SlugRecord};
use crate::domain::slug::value_objects::{Slug, SlugParentId, SlugRecordId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Store for one kind of slug record (one table). Uniqueness of `slug` across
/// the whole kind must be enforced atomically by the store; `insert` reports a
/// violation as `DomainError::Conflict`.
///
/// Every listing returns records most-recent-first: `created_at` descending,
/// then `id` descending.
#[async_trait]
pub trait SlugRepository: Send + Sync {
    async fn insert(&self, record: NewSlugRecord) -> DomainResult<SlugRecord>;

    async fn set_active(&self, id: SlugRecordId, is_active: bool) -> DomainResult<SlugRecord>;

    /// Set `created_at` of a record, moving it within its owner's ordering.
    async fn touch(&self, id: SlugRecordId, at: DateTime<Utc>) -> DomainResult<SlugRecord>;

    async fn slug_exists(&self, slug: &Slug) -> DomainResult<bool>;

    async fn find_by_id(&self, id: SlugRecordId) -> DomainResult<Option<SlugRecord>>;

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<SlugRecord>>;

    async fn has_active(&self, parent: SlugParentId) -> DomainResult<bool>;

    async fn list_active(&self, parent: SlugParentId) -> DomainResult<Vec<SlugRecord>>;

    /// Active records of several owners in a single round trip.
    async fn list_active_for_parents(
        &self,
        parents: &[SlugParentId],
    ) -> DomainResult<Vec<SlugRecord>>;

    async fn list_by_parent(&self, parent: SlugParentId) -> DomainResult<Vec<SlugRecord>>;
}
