// src/domain/slug/services/mod.rs
mod sluggable;

pub use sluggable::Sluggable;

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::ports::{time::Clock, util::SlugGenerator};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::entity::{NewSlugRecord, SlugRecord};
use crate::domain::slug::history::SlugHistory;
use crate::domain::slug::owner::SlugOwner;
use crate::domain::slug::repository::SlugRepository;
use crate::domain::slug::value_objects::{
    SLUG_MAX_LENGTH, Slug, SlugParentId, SlugRecordId, truncate_chars,
};

/// A warning is logged every time the suffix search passes a multiple of this.
const LONG_PROBE_WARN_INTERVAL: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlugSettings {
    /// Upper bound on slug length in characters, suffix included.
    pub max_length: usize,
    /// Highest numeric suffix to try. `None` searches forever.
    pub max_probes: Option<u64>,
}

impl Default for SlugSettings {
    fn default() -> Self {
        Self {
            max_length: SLUG_MAX_LENGTH,
            max_probes: None,
        }
    }
}

impl SlugSettings {
    pub fn new(max_length: usize, max_probes: Option<u64>) -> DomainResult<Self> {
        if max_length == 0 || max_length > SLUG_MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "slug max length must be between 1 and {SLUG_MAX_LENGTH}"
            )));
        }
        Ok(Self {
            max_length,
            max_probes,
        })
    }
}

/// Domain service that creates unique slugs for owners and reads their
/// history. One manager serves one slug record kind.
pub struct SlugManager {
    repo: Arc<dyn SlugRepository>,
    generator: Arc<dyn SlugGenerator>,
    clock: Arc<dyn Clock>,
    settings: SlugSettings,
}

impl SlugManager {
    pub fn new(
        repo: Arc<dyn SlugRepository>,
        generator: Arc<dyn SlugGenerator>,
        clock: Arc<dyn Clock>,
        settings: SlugSettings,
    ) -> Self {
        Self {
            repo,
            generator,
            clock,
            settings,
        }
    }

    pub fn repository(&self) -> Arc<dyn SlugRepository> {
        Arc::clone(&self.repo)
    }

    /// Create an active slug for `owner` unless it already has one.
    ///
    /// Returns the created record, or `None` when the call was a no-op. A
    /// unique violation on insert means another writer claimed the candidate
    /// between the lookup and the insert; it is returned as `Conflict` and not
    /// retried.
    pub async fn ensure_slug<O>(&self, owner: &O) -> DomainResult<Option<SlugRecord>>
    where
        O: SlugOwner + ?Sized,
    {
        let owner_id = owner.slug_owner_id();
        if self.repo.has_active(owner_id).await? {
            return Ok(None);
        }

        let slugified = self.generator.slugify(owner.sluggable_text()?);
        let slug = self.find_unique_slug(&slugified).await?;
        let record = NewSlugRecord::active(owner.slug_parent(), slug, self.clock.now());

        match self.repo.insert(record).await {
            Ok(created) => {
                tracing::info!(
                    owner = i64::from(owner_id),
                    slug = %created.slug,
                    "slug created"
                );
                Ok(Some(created))
            }
            Err(DomainError::Conflict(msg)) => {
                tracing::warn!(
                    owner = i64::from(owner_id),
                    error = %msg,
                    "slug claimed by a concurrent writer"
                );
                Err(DomainError::Conflict(msg))
            }
            Err(err) => Err(err),
        }
    }

    /// The slug `owner` would get if nothing collided with it.
    pub fn candidate_for<O>(&self, owner: &O) -> DomainResult<String>
    where
        O: SlugOwner + ?Sized,
    {
        let slugified = self.generator.slugify(owner.sluggable_text()?);
        Ok(truncate_chars(&slugified, self.settings.max_length).to_owned())
    }

    /// First candidate derived from `original` that no record of this kind
    /// uses yet: the truncated original, then `-1`, `-2`, ... appended to a
    /// base truncated far enough that the result stays within `max_length`.
    pub async fn find_unique_slug(&self, original: &str) -> DomainResult<Slug> {
        let max_length = self.settings.max_length;
        let base = truncate_chars(original, max_length).to_owned();
        let mut candidate = Slug::new(base.clone())?;
        let mut suffix_number: u64 = 0;

        loop {
            if !self.repo.slug_exists(&candidate).await? {
                return Ok(candidate);
            }

            suffix_number += 1;
            if let Some(max_probes) = self.settings.max_probes {
                if suffix_number > max_probes {
                    return Err(DomainError::Exhausted(format!(
                        "no free slug for {base:?} within {max_probes} suffixes"
                    )));
                }
            }
            if suffix_number % LONG_PROBE_WARN_INTERVAL == 0 {
                tracing::warn!(base = %base, suffix = suffix_number, "long slug search");
            }

            let suffix = format!("-{suffix_number}");
            if suffix.len() > max_length {
                return Err(DomainError::Exhausted(format!(
                    "no free slug for {base:?} within {max_length} characters"
                )));
            }
            let stem = truncate_chars(&base, max_length - suffix.len());
            candidate = Slug::new(format!("{stem}{suffix}"))?;
        }
    }

    /// Whether `slug` is `candidate` itself or one of the suffixed forms the
    /// suffix search would produce for it.
    pub fn derives_from(&self, slug: &Slug, candidate: &str) -> bool {
        let max_length = self.settings.max_length;
        let slug = slug.as_str();
        if slug == truncate_chars(candidate, max_length) {
            return true;
        }

        let Some((stem, number)) = slug.rsplit_once('-') else {
            return false;
        };
        let numeric = !number.is_empty()
            && !number.starts_with('0')
            && number.bytes().all(|b| b.is_ascii_digit());
        let suffix_len = number.len() + 1;
        numeric
            && suffix_len <= max_length
            && stem == truncate_chars(candidate, max_length - suffix_len)
    }

    pub async fn load_history(&self, owner: SlugParentId) -> DomainResult<SlugHistory> {
        let records = self.repo.list_active(owner).await?;
        Ok(SlugHistory::from_records(records))
    }

    /// Bind every owner to the manager with its history already loaded, using
    /// one batch fetch for all of them.
    pub async fn prefetch<O: SlugOwner>(
        manager: &Arc<Self>,
        owners: Vec<O>,
    ) -> DomainResult<Vec<Sluggable<O>>> {
        let ids: Vec<SlugParentId> = owners.iter().map(SlugOwner::slug_owner_id).collect();
        let grouped: HashMap<SlugParentId, SlugHistory> = if ids.is_empty() {
            HashMap::new()
        } else {
            SlugHistory::group_by_parent(manager.repo.list_active_for_parents(&ids).await?)
        };

        Ok(owners
            .into_iter()
            .map(|owner| {
                let history = grouped
                    .get(&owner.slug_owner_id())
                    .cloned()
                    .unwrap_or_default();
                Sluggable::with_history(Arc::clone(manager), owner, history)
            })
            .collect())
    }

    /// Every record of the owner, active or not, most-recent-first.
    pub async fn list_records<O>(&self, owner: &O) -> DomainResult<Vec<SlugRecord>>
    where
        O: SlugOwner + ?Sized,
    {
        self.repo.list_by_parent(owner.slug_owner_id()).await
    }

    /// Make one of the owner's active records the current one by re-dating
    /// it to now.
    pub async fn promote_slug<O>(&self, owner: &O, id: SlugRecordId) -> DomainResult<SlugRecord>
    where
        O: SlugOwner + ?Sized,
    {
        let record = self
            .repo
            .find_by_id(id)
            .await?
            .filter(|r| r.parent_id == owner.slug_owner_id() && r.is_active)
            .ok_or_else(|| DomainError::NotFound("slug not found".into()))?;

        let promoted = self.repo.touch(record.id, self.clock.now()).await?;
        tracing::info!(
            owner = i64::from(owner.slug_owner_id()),
            slug = %promoted.slug,
            "slug promoted"
        );
        Ok(promoted)
    }

    /// Retire or restore one of the owner's records.
    pub async fn set_slug_active<O>(
        &self,
        owner: &O,
        id: SlugRecordId,
        is_active: bool,
    ) -> DomainResult<SlugRecord>
    where
        O: SlugOwner + ?Sized,
    {
        let record = self
            .repo
            .find_by_id(id)
            .await?
            .filter(|r| r.parent_id == owner.slug_owner_id())
            .ok_or_else(|| DomainError::NotFound("slug not found".into()))?;

        if record.is_active == is_active {
            return Ok(record);
        }

        let updated = self.repo.set_active(id, is_active).await?;
        tracing::info!(
            owner = i64::from(owner.slug_owner_id()),
            slug = %updated.slug,
            is_active,
            "slug activity changed"
        );
        Ok(updated)
    }
}
