// src/domain/product/entity.rs
use crate::domain::product::value_objects::{ProductId, ProductName};
use crate::domain::slug::{SlugOwner, SlugParentId};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    /// Markdown source.
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn rename(&mut self, name: ProductName, now: DateTime<Utc>) {
        self.name = name;
        self.updated_at = now;
    }

    /// Blank text clears the description.
    pub fn describe(&mut self, description: Option<String>, now: DateTime<Utc>) {
        self.description = normalize_description(description);
        self.updated_at = now;
    }
}

pub fn normalize_description(description: Option<String>) -> Option<String> {
    description.filter(|text| !text.trim().is_empty())
}

impl SlugOwner for Product {
    fn slug_owner_id(&self) -> SlugParentId {
        SlugParentId(self.id.0)
    }

    fn slug_source(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(self.name.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: ProductName,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ProductUpdate {
    pub id: ProductId,
    pub name: ProductName,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductUpdate {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            updated_at: product.updated_at,
        }
    }
}
