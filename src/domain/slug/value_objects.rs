use crate::domain::errors::{DomainError, DomainResult};
use std::fmt;

/// Storage limit of the `slug` column.
pub const SLUG_MAX_LENGTH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlugRecordId(pub i64);

impl SlugRecordId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation(
                "slug record id must be positive".into(),
            ))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<SlugRecordId> for i64 {
    fn from(value: SlugRecordId) -> Self {
        value.0
    }
}

/// Reference to the entity a slug record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlugParentId(pub i64);

impl SlugParentId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation(
                "slug parent id must be positive".into(),
            ))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<SlugParentId> for i64 {
    fn from(value: SlugParentId) -> Self {
        value.0
    }
}

/// A URL-safe identifier. The empty string is a legal (if degenerate) slug:
/// empty source text slugifies to it and the uniqueness search still applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.chars().count() > SLUG_MAX_LENGTH {
            return Err(DomainError::Validation(format!(
                "slug cannot exceed {SLUG_MAX_LENGTH} characters"
            )));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::Validation(
                "slug may only contain ascii letters, digits, hyphens and underscores".into(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

/// Keep at most `max_chars` characters of `value`.
pub fn truncate_chars(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
