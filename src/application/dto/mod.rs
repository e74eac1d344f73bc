pub mod pagination;
pub mod products;
pub mod serde_time;

pub use pagination::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, OffsetPage, clamp_limit};
pub use products::{EnsureSlugDto, ProductDto, ProductLookup, SlugRecordDto};
