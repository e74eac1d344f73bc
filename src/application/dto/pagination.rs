use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const MAX_PAGE_LIMIT: u32 = 100;

/// One limit/offset window over a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct OffsetPage<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub limit: u32,
    pub offset: u64,
}

impl<T> OffsetPage<T> {
    pub fn new(items: Vec<T>, total: u64, limit: u32, offset: u64) -> Self {
        Self {
            items,
            total,
            limit,
            offset,
        }
    }

    pub fn next_offset(&self) -> Option<u64> {
        let next = self.offset + u64::from(self.limit);
        (next < self.total).then_some(next)
    }

    pub fn previous_offset(&self) -> Option<u64> {
        (self.offset > 0).then(|| self.offset.saturating_sub(u64::from(self.limit)))
    }
}

/// Missing limits get the default; oversized ones are capped.
pub fn clamp_limit(limit: Option<u32>) -> u32 {
    limit
        .unwrap_or(DEFAULT_PAGE_LIMIT)
        .clamp(1, MAX_PAGE_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_applies_default_and_cap() {
        assert_eq!(clamp_limit(None), 10);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(500)), 100);
        assert_eq!(clamp_limit(Some(25)), 25);
    }

    #[test]
    fn neighbours_of_a_middle_page() {
        let page = OffsetPage::new(vec![(); 10], 35, 10, 10);
        assert_eq!(page.next_offset(), Some(20));
        assert_eq!(page.previous_offset(), Some(0));
    }

    #[test]
    fn first_and_last_pages_have_one_neighbour() {
        let first = OffsetPage::<()>::new(vec![], 15, 10, 0);
        assert_eq!(first.previous_offset(), None);
        assert_eq!(first.next_offset(), Some(10));

        let last = OffsetPage::<()>::new(vec![], 15, 10, 10);
        assert_eq!(last.next_offset(), None);
        assert_eq!(last.previous_offset(), Some(0));
    }

    #[test]
    fn previous_offset_does_not_underflow() {
        let page = OffsetPage::<()>::new(vec![], 50, 10, 4);
        assert_eq!(page.previous_offset(), Some(0));
    }
}
