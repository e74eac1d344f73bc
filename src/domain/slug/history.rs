use crate::domain::slug::entity::SlugRecord;
use crate::domain::slug::value_objects::{Slug, SlugParentId};
use std::cmp::Reverse;
use std::collections::HashMap;

/// Snapshot of one owner's active slug records, most-recent-first. The
/// current slug and the old slugs are both read from the same snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlugHistory {
    records: Vec<SlugRecord>,
}

impl SlugHistory {
    /// Inactive records are dropped and the rest put in canonical order.
    pub fn from_records(records: Vec<SlugRecord>) -> Self {
        let mut records: Vec<SlugRecord> = records.into_iter().filter(|r| r.is_active).collect();
        records.sort_by_key(|r| Reverse((r.created_at, r.id.0)));
        Self { records }
    }

    /// Split a batch fetch into one history per owner.
    pub fn group_by_parent(records: Vec<SlugRecord>) -> HashMap<SlugParentId, SlugHistory> {
        let mut grouped: HashMap<SlugParentId, Vec<SlugRecord>> = HashMap::new();
        for record in records {
            grouped.entry(record.parent_id).or_default().push(record);
        }
        grouped
            .into_iter()
            .map(|(parent, records)| (parent, Self::from_records(records)))
            .collect()
    }

    pub fn current(&self) -> Option<&Slug> {
        self.records.first().map(|r| &r.slug)
    }

    pub fn old_slugs(&self) -> Vec<Slug> {
        self.records.iter().skip(1).map(|r| r.slug.clone()).collect()
    }

    pub fn contains(&self, slug: &Slug) -> bool {
        self.records.iter().any(|r| &r.slug == slug)
    }

    pub fn records(&self) -> &[SlugRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
