use std::sync::Arc;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::markup::MarkdownRenderer,
    },
    domain::{
        product::{Product, ProductId, ProductRepository},
        slug::{SlugManager, Sluggable},
    },
};

pub struct ProductQueryService {
    pub(super) product_repo: Arc<dyn ProductRepository>,
    pub(super) slug_manager: Arc<SlugManager>,
    pub(super) markdown: Arc<dyn MarkdownRenderer>,
}

impl ProductQueryService {
    pub fn new(
        product_repo: Arc<dyn ProductRepository>,
        slug_manager: Arc<SlugManager>,
        markdown: Arc<dyn MarkdownRenderer>,
    ) -> Self {
        Self {
            product_repo,
            slug_manager,
            markdown,
        }
    }

    pub(super) async fn load(&self, id: ProductId) -> ApplicationResult<Sluggable<Product>> {
        let product = self
            .product_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("product not found"))?;
        Ok(Sluggable::new(Arc::clone(&self.slug_manager), product))
    }
}
