pub mod entity;
pub mod history;
pub mod owner;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use entity::{NewSlugRecord, SlugRecord};
pub use history::SlugHistory;
pub use owner::{DEFAULT_SLUG_FIELD, SlugOwner};
pub use repository::SlugRepository;
pub use services::{SlugManager, SlugSettings, Sluggable};
pub use value_objects::{SLUG_MAX_LENGTH, Slug, SlugParentId, SlugRecordId};
