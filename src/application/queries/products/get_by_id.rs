use super::ProductQueryService;
use crate::{
    application::{dto::ProductDto, error::ApplicationResult},
    domain::product::ProductId,
};

pub struct GetProductQuery {
    pub id: i64,
}

impl ProductQueryService {
    pub async fn get_product(&self, query: GetProductQuery) -> ApplicationResult<ProductDto> {
        let mut product = self.load(ProductId::new(query.id)?).await?;
        Ok(ProductDto::from_sluggable(&mut product, self.markdown.as_ref()).await?)
    }
}
