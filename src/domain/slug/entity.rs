use crate::domain::slug::value_objects::{Slug, SlugParentId, SlugRecordId};
use chrono::{DateTime, Utc};
use std::fmt;

/// One identifier claim for an owner. Only `is_active` changes after insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugRecord {
    pub id: SlugRecordId,
    pub parent_id: SlugParentId,
    pub slug: Slug,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for SlugRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.slug, f)
    }
}

#[derive(Debug, Clone)]
pub struct NewSlugRecord {
    pub parent_id: SlugParentId,
    pub slug: Slug,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl NewSlugRecord {
    pub fn active(parent_id: SlugParentId, slug: Slug, created_at: DateTime<Utc>) -> Self {
        Self {
            parent_id,
            slug,
            is_active: true,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_displays_as_its_slug() {
        let record = SlugRecord {
            id: SlugRecordId::new(1).unwrap(),
            parent_id: SlugParentId::new(1).unwrap(),
            slug: Slug::new("nop").unwrap(),
            is_active: true,
            created_at: Utc::now(),
        };
        assert_eq!(record.to_string(), "nop");
    }

    #[test]
    fn new_records_start_active() {
        let record = NewSlugRecord::active(
            SlugParentId::new(3).unwrap(),
            Slug::new("foo").unwrap(),
            Utc::now(),
        );
        assert!(record.is_active);
    }
}
