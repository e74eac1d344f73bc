// tests/support/mocks/product_repo.rs
use async_trait::async_trait;
use slugkeeper::domain::errors::{DomainError, DomainResult};
use slugkeeper::domain::product::{
    NewProduct, Product, ProductId, ProductRepository, ProductUpdate,
};
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemoryProductRepo {
    products: Mutex<Vec<Product>>,
}

impl InMemoryProductRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepo {
    async fn insert(&self, product: NewProduct) -> DomainResult<Product> {
        let mut products = self.products.lock().unwrap();
        let created = Product {
            id: ProductId(products.len() as i64 + 1),
            name: product.name,
            description: product.description,
            created_at: product.created_at,
            updated_at: product.updated_at,
        };
        products.push(created.clone());
        Ok(created)
    }

    async fn update(&self, update: ProductUpdate) -> DomainResult<Product> {
        let mut products = self.products.lock().unwrap();
        let product = products
            .iter_mut()
            .find(|product| product.id == update.id)
            .ok_or_else(|| DomainError::NotFound("product not found".into()))?;
        product.name = update.name;
        product.description = update.description;
        product.updated_at = update.updated_at;
        Ok(product.clone())
    }

    async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|product| product.id == id)
            .cloned())
    }

    async fn list_page(&self, limit: u32, offset: u64) -> DomainResult<(Vec<Product>, u64)> {
        let products = self.products.lock().unwrap();
        let page = products
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok((page, products.len() as u64))
    }
}
