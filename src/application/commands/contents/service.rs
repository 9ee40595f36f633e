// src/application/commands/contents/service.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::ContentDto,
        error::{ApplicationError, ApplicationResult},
        ports::{
            cache::{ContentCache, entity_id_key, entity_slug_key},
            events::EventPublisher,
            storage::{FileStore, UploadedFile},
            time::Clock,
        },
    },
    domain::{
        content::{
            ContentReadRepository, ContentWriteRepository, services::ContentSlugService,
            value_objects::{ContentId, ContentSlug},
        },
        media::NewMedia,
    },
};

pub struct ContentCommandService {
    pub(super) write_repo: Arc<dyn ContentWriteRepository>,
    pub(super) read_repo: Arc<dyn ContentReadRepository>,
    pub(super) slug_service: Arc<ContentSlugService>,
    pub(super) file_store: Arc<dyn FileStore>,
    pub(super) cache: Arc<dyn ContentCache>,
    pub(super) events: Arc<dyn EventPublisher>,
    pub(super) clock: Arc<dyn Clock>,
}

impl ContentCommandService {
    pub fn new(
        write_repo: Arc<dyn ContentWriteRepository>,
        read_repo: Arc<dyn ContentReadRepository>,
        slug_service: Arc<ContentSlugService>,
        file_store: Arc<dyn FileStore>,
        cache: Arc<dyn ContentCache>,
        events: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            slug_service,
            file_store,
            cache,
            events,
            clock,
        }
    }

    /// Store one upload and remember its path so a failed write can
    /// compensate.
    pub(super) async fn stage_upload(
        &self,
        file: &UploadedFile,
        staged: &mut Vec<String>,
    ) -> ApplicationResult<String> {
        let path = self.file_store.store(file).await?;
        staged.push(path.clone());
        Ok(path)
    }

    pub(super) fn media_record(file: &UploadedFile, path: String) -> NewMedia {
        let filename = path
            .rsplit_once('/')
            .map_or(path.as_str(), |(_, name)| name)
            .to_owned();
        NewMedia {
            filename,
            original_name: file.original_name.clone(),
            mime_type: file.mime_type.clone(),
            size: i64::try_from(file.size()).unwrap_or(i64::MAX),
            path,
            alt_text: file.alt_text.clone(),
        }
    }

    /// Best-effort removal of files whose rows never committed or are already
    /// gone. File storage sits outside the transaction, so failures here are
    /// logged, not surfaced.
    pub(super) async fn remove_stored_files(&self, paths: &[String]) {
        for path in paths {
            if let Err(err) = self.file_store.delete(path).await {
                tracing::warn!(%path, error = %err, "failed to remove stored file");
            }
        }
    }

    /// Every mutation drops the whole list namespace plus the entity entries
    /// under both key forms.
    pub(super) async fn invalidate_after_mutation(
        &self,
        id: ContentId,
        slug: Option<&ContentSlug>,
    ) -> ApplicationResult<()> {
        self.cache
            .invalidate_entity(&entity_id_key(i64::from(id)))
            .await?;
        if let Some(slug) = slug {
            self.cache
                .invalidate_entity(&entity_slug_key(slug.as_str()))
                .await?;
        }
        self.cache.invalidate_lists().await
    }

    pub(super) async fn load_with_relations(&self, id: ContentId) -> ApplicationResult<ContentDto> {
        let loaded = self
            .read_repo
            .find_by_id_with_relations(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("content not found"))?;
        Ok(loaded.into())
    }
}
