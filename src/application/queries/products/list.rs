use super::ProductQueryService;
use crate::{
    application::{
        dto::{OffsetPage, ProductDto, clamp_limit},
        error::ApplicationResult,
    },
    domain::slug::SlugManager,
};

#[derive(Debug, Default)]
pub struct ListProductsQuery {
    pub limit: Option<u32>,
    pub offset: Option<u64>,
}

impl ProductQueryService {
    /// One page of products. Slug histories for the whole page are loaded in
    /// a single batch.
    pub async fn list_products(
        &self,
        query: ListProductsQuery,
    ) -> ApplicationResult<OffsetPage<ProductDto>> {
        let limit = clamp_limit(query.limit);
        let offset = query.offset.unwrap_or(0);

        let (products, total) = self.product_repo.list_page(limit, offset).await?;
        let sluggables = SlugManager::prefetch(&self.slug_manager, products).await?;

        let mut items = Vec::with_capacity(sluggables.len());
        for mut product in sluggables {
            items.push(ProductDto::from_sluggable(&mut product, self.markdown.as_ref()).await?);
        }

        Ok(OffsetPage::new(items, total, limit, offset))
    }
}
