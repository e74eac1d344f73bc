// src/infrastructure/repositories/mod.rs
mod error;
mod sqlite_product;
mod sqlite_slug;

pub use error::map_sqlx;
pub use sqlite_product::SqliteProductRepository;
pub use sqlite_slug::SqliteSlugRepository;
