use crate::domain::errors::DomainResult;
use crate::domain::product::entity::{NewProduct, Product, ProductUpdate};
use crate::domain::product::value_objects::ProductId;
use async_trait::async_trait;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn insert(&self, product: NewProduct) -> DomainResult<Product>;
    async fn update(&self, update: ProductUpdate) -> DomainResult<Product>;
    async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>>;
    /// Products ordered by id, with the total count.
    async fn list_page(&self, limit: u32, offset: u64) -> DomainResult<(Vec<Product>, u64)>;
}
