// tests/support/mocks/slug_repo.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slugkeeper::domain::errors::{DomainError, DomainResult};
use slugkeeper::domain::slug::{
    NewSlugRecord, Slug, SlugParentId, SlugRecord, SlugRecordId, SlugRepository,
};
use std::cmp::Reverse;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Slug store with the same uniqueness and ordering rules as the SQL one.
#[derive(Default)]
pub struct InMemorySlugRepo {
    records: Mutex<Vec<SlugRecord>>,
}

impl InMemorySlugRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<SlugRecord> {
        self.records.lock().unwrap().clone()
    }

    fn select(&self, keep: impl Fn(&SlugRecord) -> bool) -> Vec<SlugRecord> {
        let mut selected: Vec<SlugRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|record| keep(record))
            .cloned()
            .collect();
        selected.sort_by_key(|record| Reverse((record.created_at, record.id.0)));
        selected
    }
}

#[async_trait]
impl SlugRepository for InMemorySlugRepo {
    async fn insert(&self, record: NewSlugRecord) -> DomainResult<SlugRecord> {
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|existing| existing.slug == record.slug) {
            return Err(DomainError::Conflict("slug already exists".into()));
        }

        let created = SlugRecord {
            id: SlugRecordId(records.len() as i64 + 1),
            parent_id: record.parent_id,
            slug: record.slug,
            is_active: record.is_active,
            created_at: record.created_at,
        };
        records.push(created.clone());
        Ok(created)
    }

    async fn set_active(&self, id: SlugRecordId, is_active: bool) -> DomainResult<SlugRecord> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| DomainError::NotFound("slug not found".into()))?;
        record.is_active = is_active;
        Ok(record.clone())
    }

    async fn touch(&self, id: SlugRecordId, at: DateTime<Utc>) -> DomainResult<SlugRecord> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| DomainError::NotFound("slug not found".into()))?;
        record.created_at = at;
        Ok(record.clone())
    }

    async fn slug_exists(&self, slug: &Slug) -> DomainResult<bool> {
        Ok(self.records.lock().unwrap().iter().any(|r| &r.slug == slug))
    }

    async fn find_by_id(&self, id: SlugRecordId) -> DomainResult<Option<SlugRecord>> {
        Ok(self.select(|r| r.id == id).into_iter().next())
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<SlugRecord>> {
        Ok(self.select(|r| &r.slug == slug).into_iter().next())
    }

    async fn has_active(&self, parent: SlugParentId) -> DomainResult<bool> {
        Ok(!self.select(|r| r.parent_id == parent && r.is_active).is_empty())
    }

    async fn list_active(&self, parent: SlugParentId) -> DomainResult<Vec<SlugRecord>> {
        Ok(self.select(|r| r.parent_id == parent && r.is_active))
    }

    async fn list_active_for_parents(
        &self,
        parents: &[SlugParentId],
    ) -> DomainResult<Vec<SlugRecord>> {
        Ok(self.select(|r| r.is_active && parents.contains(&r.parent_id)))
    }

    async fn list_by_parent(&self, parent: SlugParentId) -> DomainResult<Vec<SlugRecord>> {
        Ok(self.select(|r| r.parent_id == parent))
    }
}

/// Counts history fetches made through it.
pub struct CountingSlugRepo {
    inner: Arc<InMemorySlugRepo>,
    single_fetches: AtomicUsize,
    batch_fetches: AtomicUsize,
}

impl CountingSlugRepo {
    pub fn new(inner: Arc<InMemorySlugRepo>) -> Self {
        Self {
            inner,
            single_fetches: AtomicUsize::new(0),
            batch_fetches: AtomicUsize::new(0),
        }
    }

    pub fn single_fetches(&self) -> usize {
        self.single_fetches.load(Ordering::SeqCst)
    }

    pub fn batch_fetches(&self) -> usize {
        self.batch_fetches.load(Ordering::SeqCst)
    }

    pub fn history_fetches(&self) -> usize {
        self.single_fetches() + self.batch_fetches()
    }
}

#[async_trait]
impl SlugRepository for CountingSlugRepo {
    async fn insert(&self, record: NewSlugRecord) -> DomainResult<SlugRecord> {
        self.inner.insert(record).await
    }

    async fn set_active(&self, id: SlugRecordId, is_active: bool) -> DomainResult<SlugRecord> {
        self.inner.set_active(id, is_active).await
    }

    async fn touch(&self, id: SlugRecordId, at: DateTime<Utc>) -> DomainResult<SlugRecord> {
        self.inner.touch(id, at).await
    }

    async fn slug_exists(&self, slug: &Slug) -> DomainResult<bool> {
        self.inner.slug_exists(slug).await
    }

    async fn find_by_id(&self, id: SlugRecordId) -> DomainResult<Option<SlugRecord>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<SlugRecord>> {
        self.inner.find_by_slug(slug).await
    }

    async fn has_active(&self, parent: SlugParentId) -> DomainResult<bool> {
        self.inner.has_active(parent).await
    }

    async fn list_active(&self, parent: SlugParentId) -> DomainResult<Vec<SlugRecord>> {
        self.single_fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.list_active(parent).await
    }

    async fn list_active_for_parents(
        &self,
        parents: &[SlugParentId],
    ) -> DomainResult<Vec<SlugRecord>> {
        self.batch_fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.list_active_for_parents(parents).await
    }

    async fn list_by_parent(&self, parent: SlugParentId) -> DomainResult<Vec<SlugRecord>> {
        self.inner.list_by_parent(parent).await
    }
}

/// Never sees an existing slug while probing, as if another writer always
/// inserts between the lookup and the insert.
pub struct RacingSlugRepo {
    inner: Arc<InMemorySlugRepo>,
}

impl RacingSlugRepo {
    pub fn new(inner: Arc<InMemorySlugRepo>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl SlugRepository for RacingSlugRepo {
    async fn insert(&self, record: NewSlugRecord) -> DomainResult<SlugRecord> {
        self.inner.insert(record).await
    }

    async fn set_active(&self, id: SlugRecordId, is_active: bool) -> DomainResult<SlugRecord> {
        self.inner.set_active(id, is_active).await
    }

    async fn touch(&self, id: SlugRecordId, at: DateTime<Utc>) -> DomainResult<SlugRecord> {
        self.inner.touch(id, at).await
    }

    async fn slug_exists(&self, _slug: &Slug) -> DomainResult<bool> {
        Ok(false)
    }

    async fn find_by_id(&self, id: SlugRecordId) -> DomainResult<Option<SlugRecord>> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_slug(&self, slug: &Slug) -> DomainResult<Option<SlugRecord>> {
        self.inner.find_by_slug(slug).await
    }

    async fn has_active(&self, parent: SlugParentId) -> DomainResult<bool> {
        self.inner.has_active(parent).await
    }

    async fn list_active(&self, parent: SlugParentId) -> DomainResult<Vec<SlugRecord>> {
        self.inner.list_active(parent).await
    }

    async fn list_active_for_parents(
        &self,
        parents: &[SlugParentId],
    ) -> DomainResult<Vec<SlugRecord>> {
        self.inner.list_active_for_parents(parents).await
    }

    async fn list_by_parent(&self, parent: SlugParentId) -> DomainResult<Vec<SlugRecord>> {
        self.inner.list_by_parent(parent).await
    }
}
