// tests/support/mocks/owners.rs
use slugkeeper::domain::slug::{SlugOwner, SlugParentId};

/// Minimal owner whose slug comes from `name`.
#[derive(Debug, Clone)]
pub struct Named {
    pub id: i64,
    pub name: String,
}

impl Named {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl SlugOwner for Named {
    fn slug_owner_id(&self) -> SlugParentId {
        SlugParentId(self.id)
    }

    fn slug_source(&self, field: &str) -> Option<&str> {
        (field == "name").then_some(self.name.as_str())
    }
}
