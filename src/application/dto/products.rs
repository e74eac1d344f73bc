use crate::application::ports::markup::MarkdownRenderer;
use crate::domain::errors::DomainResult;
use crate::domain::product::Product;
use crate::domain::slug::{SlugRecord, Sluggable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    /// Markdown source of the description.
    pub description: Option<String>,
    /// Sanitized HTML rendering of `description`; empty when there is none.
    pub description_html: String,
    /// Canonical slug, absent until one has been ensured.
    pub slug: Option<String>,
    /// Other active slugs, most recent first.
    pub old_slugs: Vec<String>,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl ProductDto {
    /// Reads `slug` and `old_slugs` through the wrapper's cache, so a
    /// prefetched history costs no further queries.
    pub async fn from_sluggable(
        product: &mut Sluggable<Product>,
        markdown: &dyn MarkdownRenderer,
    ) -> DomainResult<Self> {
        let slug = product.slug().await?.map(String::from);
        let old_slugs = product
            .old_slugs()
            .await?
            .into_iter()
            .map(String::from)
            .collect();
        let owner = product.owner();
        let description_html = owner
            .description
            .as_deref()
            .map(|source| markdown.render(source))
            .unwrap_or_default();
        Ok(Self {
            id: owner.id.into(),
            name: owner.name.as_str().to_owned(),
            description: owner.description.clone(),
            description_html,
            slug,
            old_slugs,
            created_at: owner.created_at,
            updated_at: owner.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SlugRecordDto {
    pub id: i64,
    pub slug: String,
    pub is_active: bool,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
}

impl From<SlugRecord> for SlugRecordDto {
    fn from(record: SlugRecord) -> Self {
        Self {
            id: record.id.into(),
            slug: record.slug.into_inner(),
            is_active: record.is_active,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EnsureSlugDto {
    /// Whether this call created a record.
    pub created: bool,
    pub slug: Option<String>,
}

/// Outcome of resolving a public slug.
#[derive(Debug, Clone)]
pub enum ProductLookup {
    Found(ProductDto),
    /// The slug is an old one; clients should move to `canonical_slug`.
    Moved { canonical_slug: String },
}
