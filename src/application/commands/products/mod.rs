// src/application/commands/products/mod.rs
mod create;
mod rename;
mod service;
mod slugs;

pub use create::CreateProductCommand;
pub use rename::RenameProductCommand;
pub use service::ProductCommandService;
pub use slugs::{EnsureProductSlugCommand, SetSlugActiveCommand};
