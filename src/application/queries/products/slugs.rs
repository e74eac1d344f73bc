use super::ProductQueryService;
use crate::{
    application::{dto::SlugRecordDto, error::ApplicationResult},
    domain::product::ProductId,
};

pub struct ListProductSlugsQuery {
    pub product_id: i64,
}

impl ProductQueryService {
    /// Every slug record of a product, retired ones included.
    pub async fn list_product_slugs(
        &self,
        query: ListProductSlugsQuery,
    ) -> ApplicationResult<Vec<SlugRecordDto>> {
        let product = self.load(ProductId::new(query.product_id)?).await?;
        let records = product.records().await?;
        Ok(records.into_iter().map(SlugRecordDto::from).collect())
    }
}
