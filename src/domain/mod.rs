pub mod errors;
pub mod product;
pub mod slug;
