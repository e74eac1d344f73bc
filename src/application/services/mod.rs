// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::products::ProductCommandService,
        ports::{markup::MarkdownRenderer, time::Clock, util::SlugGenerator},
        queries::products::ProductQueryService,
    },
    domain::{
        product::ProductRepository,
        slug::{SlugManager, SlugRepository, SlugSettings},
    },
};

pub struct ApplicationServices {
    pub product_commands: Arc<ProductCommandService>,
    pub product_queries: Arc<ProductQueryService>,
}

impl ApplicationServices {
    pub fn new(
        product_repo: Arc<dyn ProductRepository>,
        product_slug_repo: Arc<dyn SlugRepository>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
        markdown: Arc<dyn MarkdownRenderer>,
        slug_settings: SlugSettings,
    ) -> Self {
        let slug_manager = Arc::new(SlugManager::new(
            product_slug_repo,
            slugger,
            Arc::clone(&clock),
            slug_settings,
        ));

        let product_commands = Arc::new(ProductCommandService::new(
            Arc::clone(&product_repo),
            Arc::clone(&slug_manager),
            Arc::clone(&markdown),
            Arc::clone(&clock),
        ));

        let product_queries = Arc::new(ProductQueryService::new(
            Arc::clone(&product_repo),
            slug_manager,
            markdown,
        ));

        Self {
            product_commands,
            product_queries,
        }
    }
}
