// tests/support/helpers.rs
use super::mocks::{InMemoryProductRepo, InMemorySlugRepo, SteppingClock};
use axum::Router;
use axum::body::{self, Body};
use axum::http::Response;
use serde_json::Value;
use slugkeeper::application::ports::{markup::MarkdownRenderer, time::Clock, util::SlugGenerator};
use slugkeeper::application::services::ApplicationServices;
use slugkeeper::domain::product::ProductRepository;
use slugkeeper::domain::slug::{SlugManager, SlugRepository, SlugSettings};
use slugkeeper::config::AppConfig;
use slugkeeper::infrastructure::{markdown::SanitizedMarkdown, util::DefaultSlugGenerator};
use slugkeeper::presentation::http::middleware::{
    admin_auth::AdminCredentials,
    admin_restrict::{AdminAccessPolicy, parse_subnet},
};
use slugkeeper::presentation::http::{routes::build_router_with_rate_limit, state::HttpState};
use std::sync::Arc;

pub fn slug_manager(
    repo: Arc<dyn SlugRepository>,
    generator: Arc<dyn SlugGenerator>,
    settings: SlugSettings,
) -> Arc<SlugManager> {
    let clock: Arc<dyn Clock> = Arc::new(SteppingClock::default());
    Arc::new(SlugManager::new(repo, generator, clock, settings))
}

/// Services over in-memory stores, with the real slug generator.
pub fn build_services(slug_repo: Arc<dyn SlugRepository>) -> Arc<ApplicationServices> {
    let product_repo: Arc<dyn ProductRepository> = Arc::new(InMemoryProductRepo::new());
    let clock: Arc<dyn Clock> = Arc::new(SteppingClock::default());
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);
    let markdown: Arc<dyn MarkdownRenderer> = Arc::new(SanitizedMarkdown::new());

    Arc::new(ApplicationServices::new(
        product_repo,
        slug_repo,
        clock,
        slugger,
        markdown,
        SlugSettings::default(),
    ))
}

pub fn loopback_policy() -> AdminAccessPolicy {
    AdminAccessPolicy::new("admin", &[], vec![parse_subnet("127.0.0.1").unwrap()])
}

pub const ADMIN_TOKEN: &str = "test-admin-token";

pub fn admin_credentials() -> AdminCredentials {
    AdminCredentials::new(Some(ADMIN_TOKEN))
}

/// Router without rate limiting; oneshot requests carry no peer address.
pub fn make_test_router() -> (Router, Arc<ApplicationServices>) {
    let services = build_services(Arc::new(InMemorySlugRepo::new()));
    let state = HttpState {
        services: Arc::clone(&services),
    };
    (
        build_router_with_rate_limit(state, loopback_policy(), admin_credentials(), None),
        services,
    )
}

/// Router wired from configuration, without rate limiting.
pub fn make_router_from_config(pairs: &[(&str, &str)]) -> Router {
    let vars: std::collections::HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    let config = AppConfig::from_lookup(|key| vars.get(key).cloned()).expect("valid config");

    let services = build_services(Arc::new(InMemorySlugRepo::new()));
    build_router_with_rate_limit(
        HttpState { services },
        config.admin_access_policy(),
        config.admin_credentials(),
        None,
    )
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}
