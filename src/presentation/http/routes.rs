// src/presentation/http/routes.rs
use crate::presentation::http::middleware::{
    admin_auth::{AdminCredentials, require_admin_token},
    admin_restrict::{AdminAccessPolicy, restrict_admin_area},
    never_cache::never_cache_layer,
    rate_limit::{RateLimitSettings, rate_limit_layer},
};
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{admin, products},
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    body::Body,
    http::Request,
    middleware,
    routing::{get, patch, post},
};
use std::sync::Arc;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::Span;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Router with the default public rate limit.
pub fn build_router(
    state: HttpState,
    policy: AdminAccessPolicy,
    credentials: AdminCredentials,
) -> Router {
    build_router_with_rate_limit(
        state,
        policy,
        credentials,
        Some(RateLimitSettings::default()),
    )
}

/// `rate_limit = None` leaves public lookups unthrottled.
pub fn build_router_with_rate_limit(
    state: HttpState,
    policy: AdminAccessPolicy,
    credentials: AdminCredentials,
    rate_limit: Option<RateLimitSettings>,
) -> Router {
    // The second route serves the empty slug.
    let mut public = Router::new()
        .route(
            "/api/v1/products/by-slug/{slug}",
            get(products::get_product_by_slug),
        )
        .route(
            "/api/v1/products/by-slug/",
            get(products::get_product_by_empty_slug),
        );
    if let Some(layer) = rate_limit.and_then(rate_limit_layer) {
        public = public.layer(layer);
    }

    let admin_api_path = policy.admin_api_path();
    let admin = Router::new()
        .route(
            "/products",
            get(admin::list_products).post(admin::create_product),
        )
        .route(
            "/products/{id}",
            get(admin::get_product).patch(admin::rename_product),
        )
        .route("/products/{id}/slugs", get(admin::list_product_slugs))
        .route(
            "/products/{id}/slugs/ensure",
            post(admin::ensure_product_slug),
        )
        .route(
            "/products/{id}/slugs/{slug_id}",
            patch(admin::set_slug_active),
        )
        .layer(middleware::from_fn_with_state(
            Arc::new(credentials),
            require_admin_token,
        ))
        .layer(never_cache_layer());

    Router::new()
        .merge(openapi::docs_router(&admin_api_path))
        .route("/health", get(health))
        .merge(public)
        .nest(&admin_api_path, admin)
        .layer(middleware::from_fn_with_state(
            Arc::new(policy),
            restrict_admin_area,
        ))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(Extension(state))
}

/// Carries the request id, so every line logged while serving the request
/// can be correlated.
fn request_span(req: &Request<Body>) -> Span {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    )
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
