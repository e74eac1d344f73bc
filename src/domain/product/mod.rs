pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{NewProduct, Product, ProductUpdate, normalize_description};
pub use repository::ProductRepository;
pub use value_objects::{PRODUCT_NAME_MAX_LENGTH, ProductId, ProductName};
