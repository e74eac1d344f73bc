// src/application/commands/products/service.rs
use std::sync::Arc;

use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::{markup::MarkdownRenderer, time::Clock},
    },
    domain::{
        product::{Product, ProductId, ProductRepository},
        slug::{SlugManager, Sluggable},
    },
};

pub struct ProductCommandService {
    pub(super) product_repo: Arc<dyn ProductRepository>,
    pub(super) slug_manager: Arc<SlugManager>,
    pub(super) markdown: Arc<dyn MarkdownRenderer>,
    pub(super) clock: Arc<dyn Clock>,
}

impl ProductCommandService {
    pub fn new(
        product_repo: Arc<dyn ProductRepository>,
        slug_manager: Arc<SlugManager>,
        markdown: Arc<dyn MarkdownRenderer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            product_repo,
            slug_manager,
            markdown,
            clock,
        }
    }

    pub(super) async fn load(&self, id: i64) -> ApplicationResult<Sluggable<Product>> {
        let id = ProductId::new(id)?;
        let product = self
            .product_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("product not found"))?;
        Ok(Sluggable::new(Arc::clone(&self.slug_manager), product))
    }
}
