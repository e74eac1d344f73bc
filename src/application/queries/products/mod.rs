mod get_by_id;
mod get_by_slug;
mod list;
mod service;
mod slugs;

pub use get_by_id::GetProductQuery;
pub use get_by_slug::GetProductBySlugQuery;
pub use list::ListProductsQuery;
pub use service::ProductQueryService;
pub use slugs::ListProductSlugsQuery;
