// src/presentation/http/middleware/mod.rs
pub mod admin_auth;
pub mod admin_restrict;
pub mod never_cache;
pub mod rate_limit;
