use anyhow::Result;
use slugkeeper::application::{
    ports::{markup::MarkdownRenderer, time::Clock, util::SlugGenerator},
    services::ApplicationServices,
};
use slugkeeper::config::AppConfig;
use slugkeeper::domain::{product::ProductRepository, slug::SlugRepository};
use slugkeeper::infrastructure::{
    database,
    logging::init_tracing,
    markdown::SanitizedMarkdown,
    repositories::{SqliteProductRepository, SqliteSlugRepository},
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use slugkeeper::presentation::http::{routes::build_router_with_rate_limit, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    let config = AppConfig::from_env()?;
    init_tracing(config.log_format());

    let pool = database::init_pool(config.database_url(), config.database_max_connections()).await?;
    database::run_migrations(&pool).await?;
    let pool = Arc::new(pool);

    let product_repo: Arc<dyn ProductRepository> =
        Arc::new(SqliteProductRepository::new(Arc::clone(&pool)));
    let product_slug_repo: Arc<dyn SlugRepository> =
        Arc::new(SqliteSlugRepository::products(Arc::clone(&pool)));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);
    let markdown: Arc<dyn MarkdownRenderer> = Arc::new(SanitizedMarkdown::new());

    let services = Arc::new(ApplicationServices::new(
        product_repo,
        product_slug_repo,
        clock,
        slugger,
        markdown,
        config.slug_settings(),
    ));

    let state = HttpState {
        services: Arc::clone(&services),
    };

    let credentials = config.admin_credentials();
    if !credentials.is_configured() {
        tracing::warn!("ADMIN_API_TOKEN is not set; admin API requests will be refused");
    }
    if config.field_cipher().is_some() {
        tracing::info!("field encryption key loaded");
    }

    let app = build_router_with_rate_limit(
        state,
        config.admin_access_policy(),
        credentials,
        config.rate_limit(),
    );

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!(%address, "listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
