// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::contents::ContentCommandService,
        ports::{
            cache::ContentCache, events::EventPublisher, storage::FileStore, time::Clock,
            util::SlugGenerator,
        },
        queries::contents::ContentQueryService,
    },
    domain::content::{
        ContentReadRepository, ContentWriteRepository, services::ContentSlugService,
    },
};

/// Wired application surface: one command service and one query service
/// sharing the injected ports. Configured once at startup and passed by
/// reference to the calling layer.
pub struct ApplicationServices {
    pub content_commands: Arc<ContentCommandService>,
    pub content_queries: Arc<ContentQueryService>,
}

impl ApplicationServices {
    pub fn new(
        write_repo: Arc<dyn ContentWriteRepository>,
        read_repo: Arc<dyn ContentReadRepository>,
        cache: Arc<dyn ContentCache>,
        file_store: Arc<dyn FileStore>,
        events: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
    ) -> Self {
        let slug_service = Arc::new(ContentSlugService::new(
            Arc::clone(&read_repo),
            Arc::clone(&slugger),
        ));

        let content_commands = Arc::new(ContentCommandService::new(
            Arc::clone(&write_repo),
            Arc::clone(&read_repo),
            slug_service,
            Arc::clone(&file_store),
            Arc::clone(&cache),
            Arc::clone(&events),
            Arc::clone(&clock),
        ));

        let content_queries = Arc::new(ContentQueryService::new(
            Arc::clone(&read_repo),
            Arc::clone(&cache),
        ));

        Self {
            content_commands,
            content_queries,
        }
    }
}
