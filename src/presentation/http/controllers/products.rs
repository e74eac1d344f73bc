// src/presentation/http/controllers/products.rs
use crate::application::{
    dto::{ProductDto, ProductLookup},
    queries::products::GetProductBySlugQuery,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::Path,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

pub const PUBLIC_BY_SLUG_PREFIX: &str = "/api/v1/products/by-slug";

fn by_slug_location(slug: &str) -> String {
    format!("{PUBLIC_BY_SLUG_PREFIX}/{slug}")
}

#[utoipa::path(
    get,
    path = "/api/v1/products/by-slug/{slug}",
    params(("slug" = String, Path, description = "Any active slug of the product")),
    responses(
        (status = 200, description = "Product addressed by its canonical slug.", body = ProductDto),
        (status = 301, description = "Old slug; `Location` points at the canonical one."),
        (status = 404, description = "Unknown or retired slug.", body = crate::presentation::http::error::ErrorResponse),
        (status = 429, description = "Rate limit exceeded.")
    ),
    tag = "Products"
)]
pub async fn get_product_by_slug(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Response> {
    lookup(&state, slug).await
}

/// Text that slugifies to nothing gets the empty slug, addressed with a
/// trailing slash.
#[utoipa::path(
    get,
    path = "/api/v1/products/by-slug/",
    responses(
        (status = 200, description = "Product whose canonical slug is empty.", body = ProductDto),
        (status = 301, description = "Old slug; `Location` points at the canonical one."),
        (status = 404, description = "No product owns the empty slug.", body = crate::presentation::http::error::ErrorResponse),
        (status = 429, description = "Rate limit exceeded.")
    ),
    tag = "Products"
)]
pub async fn get_product_by_empty_slug(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Response> {
    lookup(&state, String::new()).await
}

async fn lookup(state: &HttpState, slug: String) -> HttpResult<Response> {
    let lookup = state
        .services
        .product_queries
        .get_product_by_slug(GetProductBySlugQuery { slug })
        .await
        .into_http()?;

    Ok(match lookup {
        ProductLookup::Found(product) => Json(product).into_response(),
        ProductLookup::Moved { canonical_slug } => (
            StatusCode::MOVED_PERMANENTLY,
            [(header::LOCATION, by_slug_location(&canonical_slug))],
        )
            .into_response(),
    })
}
