use super::ProductQueryService;
use crate::{
    application::{
        dto::{ProductDto, ProductLookup},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{product::ProductId, slug::Slug},
};

pub struct GetProductBySlugQuery {
    pub slug: String,
}

impl ProductQueryService {
    /// Resolve a public slug. Retired (inactive) slugs do not resolve; old
    /// active slugs resolve to a move towards the canonical one.
    pub async fn get_product_by_slug(
        &self,
        query: GetProductBySlugQuery,
    ) -> ApplicationResult<ProductLookup> {
        let not_found = || ApplicationError::not_found("product not found");

        let slug = Slug::new(query.slug).map_err(|_| not_found())?;
        let record = self
            .slug_manager
            .repository()
            .find_by_slug(&slug)
            .await?
            .filter(|record| record.is_active)
            .ok_or_else(not_found)?;

        let mut product = self.load(ProductId::new(record.parent_id.into())?).await?;
        let canonical = product.slug().await?.ok_or_else(not_found)?;

        if canonical != slug {
            return Ok(ProductLookup::Moved {
                canonical_slug: canonical.into_inner(),
            });
        }

        Ok(ProductLookup::Found(
            ProductDto::from_sluggable(&mut product, self.markdown.as_ref()).await?,
        ))
    }
}
