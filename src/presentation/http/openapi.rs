// src/presentation/http/openapi.rs
use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::Arc;
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
    server::Server,
};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::products::get_product_by_slug,
        crate::presentation::http::controllers::products::get_product_by_empty_slug,
        crate::presentation::http::controllers::admin::list_products,
        crate::presentation::http::controllers::admin::get_product,
        crate::presentation::http::controllers::admin::create_product,
        crate::presentation::http::controllers::admin::rename_product,
        crate::presentation::http::controllers::admin::list_product_slugs,
        crate::presentation::http::controllers::admin::ensure_product_slug,
        crate::presentation::http::controllers::admin::set_slug_active,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::admin::CreateProductRequest,
            crate::presentation::http::controllers::admin::RenameProductRequest,
            crate::presentation::http::controllers::admin::SetSlugActiveRequest,
            crate::presentation::http::controllers::admin::ProductListResponse,
            crate::presentation::http::controllers::admin::PageMeta,
            crate::presentation::http::controllers::admin::PageTotal,
            crate::presentation::http::controllers::admin::PageLinks,
            crate::application::dto::ProductDto,
            crate::application::dto::SlugRecordDto,
            crate::application::dto::EnsureSlugDto
        )
    ),
    tags(
        (name = "Products", description = "Public product lookup by slug"),
        (name = "Admin", description = "Product and slug management"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    info(
        title = "Slugkeeper API",
        description = "Products addressed by unique, history-keeping slugs",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

/// Paths in `ApiDoc` are written against the default admin mount.
const DOCUMENTED_ADMIN_API: &str = "/admin/api";

/// Registers the admin bearer scheme and advertises the comma separated
/// `PUBLIC_API_URLS`, if set.
struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        components.add_security_scheme(
            "adminToken",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );

        let Ok(value) = env::var("PUBLIC_API_URLS") else {
            return;
        };

        let mut urls: Vec<String> = Vec::new();
        for url in value.split(',').map(str::trim).filter(|url| !url.is_empty()) {
            let url = url.trim_end_matches('/').to_string();
            if !urls.contains(&url) {
                urls.push(url);
            }
        }

        if !urls.is_empty() {
            openapi.servers = Some(urls.into_iter().map(Server::new).collect());
        }
    }
}

/// The document with admin paths moved under `admin_api_path`.
pub fn openapi_document(admin_api_path: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    if admin_api_path != DOCUMENTED_ADMIN_API {
        let paths = std::mem::take(&mut doc.paths.paths);
        doc.paths.paths = paths
            .into_iter()
            .map(|(path, item)| match path.strip_prefix(DOCUMENTED_ADMIN_API) {
                Some(rest) => (format!("{admin_api_path}{rest}"), item),
                None => (path, item),
            })
            .collect();
    }
    doc
}

pub fn docs_router(admin_api_path: &str) -> Router {
    let document = Arc::new(openapi_document(admin_api_path));
    Router::new().route(
        "/openapi.json",
        get(move || {
            let document = Arc::clone(&document);
            async move { Json(document.as_ref().clone()) }
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(doc: &utoipa::openapi::OpenApi) -> Vec<&str> {
        doc.paths.paths.keys().map(String::as_str).collect()
    }

    #[test]
    fn document_lists_every_route() {
        let doc = openapi_document(DOCUMENTED_ADMIN_API);
        let paths = paths(&doc);
        for expected in [
            "/health",
            "/api/v1/products/by-slug/{slug}",
            "/api/v1/products/by-slug/",
            "/admin/api/products",
            "/admin/api/products/{id}",
            "/admin/api/products/{id}/slugs",
            "/admin/api/products/{id}/slugs/ensure",
            "/admin/api/products/{id}/slugs/{slug_id}",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }

        let components = doc.components.as_ref().unwrap();
        assert!(components.security_schemes.contains_key("adminToken"));
    }

    #[test]
    fn admin_paths_follow_the_mount() {
        let doc = openapi_document("/staff/api");
        let paths = paths(&doc);
        assert!(paths.contains(&"/staff/api/products/{id}/slugs"));
        assert!(paths.contains(&"/api/v1/products/by-slug/{slug}"));
        assert!(!paths.iter().any(|path| path.starts_with("/admin/")));
    }
}
