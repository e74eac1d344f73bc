use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::slug::value_objects::SlugParentId;

/// Attribute slugs are derived from unless an owner says otherwise.
pub const DEFAULT_SLUG_FIELD: &str = "name";

/// Contract an entity fulfils to get slugs managed for it.
///
/// `slug_owner_id` selects the owner's own records; `slug_parent` is what new
/// records get attached to. They only differ when slugs are modelled as
/// belonging to a related entity.
pub trait SlugOwner: Send + Sync {
    fn slug_owner_id(&self) -> SlugParentId;

    /// Text of the named attribute, `None` if the owner has no such attribute.
    fn slug_source(&self, field: &str) -> Option<&str>;

    fn slug_field_name(&self) -> &str {
        DEFAULT_SLUG_FIELD
    }

    fn slug_parent(&self) -> SlugParentId {
        self.slug_owner_id()
    }

    fn sluggable_text(&self) -> DomainResult<&str> {
        let field = self.slug_field_name();
        self.slug_source(field).ok_or_else(|| {
            DomainError::Validation(format!("unknown slug source field: {field}"))
        })
    }
}
