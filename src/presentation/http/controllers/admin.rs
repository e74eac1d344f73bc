// src/presentation/http/controllers/admin.rs
//! Product and slug management. Mounted under `/{admin area}/api`, behind
//! the admin-area IP restriction and the admin token, and never cached.
use crate::application::{
    commands::products::{
        CreateProductCommand, EnsureProductSlugCommand, RenameProductCommand, SetSlugActiveCommand,
    },
    dto::{EnsureSlugDto, OffsetPage, ProductDto, SlugRecordDto},
    queries::products::{GetProductQuery, ListProductSlugsQuery, ListProductsQuery},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{OriginalUri, Path, Query},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductListParams {
    /// Page size, 10 by default and at most 100.
    pub limit: Option<u32>,
    pub offset: Option<u64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    /// Markdown.
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RenameProductRequest {
    pub name: String,
    /// Replaces the description when present; blank text clears it.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub regenerate_slug: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetSlugActiveRequest {
    pub is_active: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PageTotal {
    pub total: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PageMeta {
    pub page: PageTotal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PageLinks {
    pub next: Option<String>,
    pub previous: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub data: Vec<ProductDto>,
    pub meta: PageMeta,
    pub links: PageLinks,
}

impl ProductListResponse {
    fn from_page(page: OffsetPage<ProductDto>, path: &str) -> Self {
        let link = |offset: u64| format!("{path}?limit={}&offset={offset}", page.limit);
        let links = PageLinks {
            next: page.next_offset().map(link),
            previous: page.previous_offset().map(link),
        };

        Self {
            meta: PageMeta {
                page: PageTotal { total: page.total },
            },
            links,
            data: page.items,
        }
    }
}

#[utoipa::path(
    get,
    path = "/admin/api/products",
    params(ProductListParams),
    responses(
        (status = 200, description = "One page of products.", body = ProductListResponse),
        (status = 400, description = "Client address not allowed.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("adminToken" = [])),
    tag = "Admin"
)]
pub async fn list_products(
    Extension(state): Extension<HttpState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<ProductListParams>,
) -> HttpResult<Json<ProductListResponse>> {
    let page = state
        .services
        .product_queries
        .list_products(ListProductsQuery {
            limit: params.limit,
            offset: params.offset,
        })
        .await
        .into_http()?;

    Ok(Json(ProductListResponse::from_page(page, uri.path())))
}

#[utoipa::path(
    get,
    path = "/admin/api/products/{id}",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product with its slugs.", body = ProductDto),
        (status = 404, description = "No such product.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("adminToken" = [])),
    tag = "Admin"
)]
pub async fn get_product(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<ProductDto>> {
    state
        .services
        .product_queries
        .get_product(GetProductQuery { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/admin/api/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created with its first slug.", body = ProductDto),
        (status = 400, description = "Invalid name.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Slug claimed concurrently.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("adminToken" = [])),
    tag = "Admin"
)]
pub async fn create_product(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<CreateProductRequest>,
) -> HttpResult<(StatusCode, Json<ProductDto>)> {
    let product = state
        .services
        .product_commands
        .create_product(CreateProductCommand {
            name: payload.name,
            description: payload.description,
        })
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    patch,
    path = "/admin/api/products/{id}",
    params(("id" = i64, Path, description = "Product id")),
    request_body = RenameProductRequest,
    responses(
        (status = 200, description = "Renamed product.", body = ProductDto),
        (status = 404, description = "No such product.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("adminToken" = [])),
    tag = "Admin"
)]
pub async fn rename_product(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    Json(payload): Json<RenameProductRequest>,
) -> HttpResult<Json<ProductDto>> {
    let command = RenameProductCommand {
        id,
        name: payload.name,
        description: payload.description,
        regenerate_slug: payload.regenerate_slug,
    };

    state
        .services
        .product_commands
        .rename_product(command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/admin/api/products/{id}/slugs",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Every slug record, most recent first.", body = [SlugRecordDto]),
        (status = 404, description = "No such product.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("adminToken" = [])),
    tag = "Admin"
)]
pub async fn list_product_slugs(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<Vec<SlugRecordDto>>> {
    state
        .services
        .product_queries
        .list_product_slugs(ListProductSlugsQuery { product_id: id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/admin/api/products/{id}/slugs/ensure",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Whether a slug was created, and the current slug.", body = EnsureSlugDto),
        (status = 409, description = "Slug claimed concurrently.", body = crate::presentation::http::error::ErrorResponse),
        (status = 503, description = "No free suffix left.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("adminToken" = [])),
    tag = "Admin"
)]
pub async fn ensure_product_slug(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<EnsureSlugDto>> {
    state
        .services
        .product_commands
        .ensure_product_slug(EnsureProductSlugCommand { product_id: id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    patch,
    path = "/admin/api/products/{id}/slugs/{slug_id}",
    params(
        ("id" = i64, Path, description = "Product id"),
        ("slug_id" = i64, Path, description = "Slug record id")
    ),
    request_body = SetSlugActiveRequest,
    responses(
        (status = 200, description = "Updated slug record.", body = SlugRecordDto),
        (status = 404, description = "No such slug on this product.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("adminToken" = [])),
    tag = "Admin"
)]
pub async fn set_slug_active(
    Extension(state): Extension<HttpState>,
    Path((id, slug_id)): Path<(i64, i64)>,
    Json(payload): Json<SetSlugActiveRequest>,
) -> HttpResult<Json<SlugRecordDto>> {
    let command = SetSlugActiveCommand {
        product_id: id,
        slug_id,
        is_active: payload.is_active,
    };

    state
        .services
        .product_commands
        .set_slug_active(command)
        .await
        .into_http()
        .map(Json)
}
