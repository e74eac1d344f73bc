// src/presentation/http/middleware/never_cache.rs
use axum::http::{HeaderValue, header::CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

pub const NEVER_CACHE: &str = "max-age=0, no-cache, no-store, must-revalidate, private";

/// Admin reads are never cacheable.
pub fn never_cache_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(CACHE_CONTROL, HeaderValue::from_static(NEVER_CACHE))
}
