use std::sync::Arc;

use super::SlugManager;
use crate::domain::errors::DomainResult;
use crate::domain::slug::entity::SlugRecord;
use crate::domain::slug::history::SlugHistory;
use crate::domain::slug::owner::SlugOwner;
use crate::domain::slug::value_objects::{Slug, SlugRecordId};

/// An owner bound to its slug manager, with a lazily loaded history cache.
///
/// The cache lives as long as this value (typically one request) and is never
/// shared. `slug` and `old_slugs` are both answered from it, so reading both
/// costs one fetch. Anything that changes the owner's records through this
/// wrapper drops the cache.
pub struct Sluggable<O> {
    manager: Arc<SlugManager>,
    owner: O,
    history: Option<SlugHistory>,
}

impl<O: SlugOwner> Sluggable<O> {
    pub fn new(manager: Arc<SlugManager>, owner: O) -> Self {
        Self {
            manager,
            owner,
            history: None,
        }
    }

    pub fn with_history(manager: Arc<SlugManager>, owner: O, history: SlugHistory) -> Self {
        Self {
            manager,
            owner,
            history: Some(history),
        }
    }

    pub fn owner(&self) -> &O {
        &self.owner
    }

    pub fn owner_mut(&mut self) -> &mut O {
        &mut self.owner
    }

    pub fn into_owner(self) -> O {
        self.owner
    }

    pub fn cached_history(&self) -> Option<&SlugHistory> {
        self.history.as_ref()
    }

    /// Drop the cached history. Safe to call when nothing is cached.
    pub fn invalidate(&mut self) {
        self.history = None;
    }

    pub async fn history(&mut self) -> DomainResult<&SlugHistory> {
        let history = match self.history.take() {
            Some(history) => history,
            None => {
                self.manager
                    .load_history(self.owner.slug_owner_id())
                    .await?
            }
        };
        Ok(&*self.history.insert(history))
    }

    pub async fn slug(&mut self) -> DomainResult<Option<Slug>> {
        Ok(self.history().await?.current().cloned())
    }

    pub async fn old_slugs(&mut self) -> DomainResult<Vec<Slug>> {
        Ok(self.history().await?.old_slugs())
    }

    pub async fn ensure_slug(&mut self) -> DomainResult<Option<SlugRecord>> {
        let created = self.manager.ensure_slug(&self.owner).await?;
        if created.is_some() {
            self.invalidate();
        }
        Ok(created)
    }

    pub async fn set_slug_active(
        &mut self,
        id: SlugRecordId,
        is_active: bool,
    ) -> DomainResult<SlugRecord> {
        let record = self
            .manager
            .set_slug_active(&self.owner, id, is_active)
            .await?;
        self.invalidate();
        Ok(record)
    }

    pub async fn promote_slug(&mut self, id: SlugRecordId) -> DomainResult<SlugRecord> {
        let record = self.manager.promote_slug(&self.owner, id).await?;
        self.invalidate();
        Ok(record)
    }

    pub async fn records(&self) -> DomainResult<Vec<SlugRecord>> {
        self.manager.list_records(&self.owner).await
    }
}
