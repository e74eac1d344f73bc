//! Stable, history-keeping URL slugs for owned records.
//!
//! Layers follow the usual split: `domain` holds the slug manager and its
//! ports, `application` the product use cases, `infrastructure` the SQLite
//! adapters and logging, `presentation` the axum API.
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
