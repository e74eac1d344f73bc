use super::ProductCommandService;
use crate::{
    application::{dto::ProductDto, error::ApplicationResult},
    domain::{
        product::{NewProduct, ProductName, normalize_description},
        slug::Sluggable,
    },
};
use std::sync::Arc;

pub struct CreateProductCommand {
    pub name: String,
    /// Markdown.
    pub description: Option<String>,
}

impl ProductCommandService {
    /// Persist a product and give it its first slug.
    pub async fn create_product(&self, command: CreateProductCommand) -> ApplicationResult<ProductDto> {
        let name = ProductName::new(command.name)?;
        let now = self.clock.now();

        let created = self
            .product_repo
            .insert(NewProduct {
                name,
                description: normalize_description(command.description),
                created_at: now,
                updated_at: now,
            })
            .await?;

        let mut product = Sluggable::new(Arc::clone(&self.slug_manager), created);
        product.ensure_slug().await?;
        Ok(ProductDto::from_sluggable(&mut product, self.markdown.as_ref()).await?)
    }
}
