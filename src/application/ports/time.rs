// src/application/ports/time.rs
use chrono::{DateTime, Utc};

/// Source of timestamps for `created_at` / `updated_at`.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
