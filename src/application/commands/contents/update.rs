// src/application/commands/contents/update.rs
use super::ContentCommandService;
use crate::{
    application::{
        dto::ContentDto,
        error::{ApplicationError, ApplicationResult},
        ports::{cache::entity_slug_key, storage::UploadedFile},
    },
    domain::{
        content::{
            ContentUpdate, UpdateOutcome,
            value_objects::{ContentBody, ContentId, ContentMeta, ContentStatus, ContentTitle},
        },
        errors::DomainResult,
        media::MediaId,
        taxonomy::{CategoryId, TagId},
    },
};

/// Partial update: `None` fields stay untouched. Association lists distinguish
/// "absent" from "present but empty": `Some(vec![])` clears the relation.
pub struct UpdateContentCommand {
    pub id: i64,
    pub title: Option<String>,
    pub body: Option<String>,
    pub excerpt: Option<String>,
    pub status: Option<ContentStatus>,
    pub meta: Option<ContentMeta>,
    pub category_ids: Option<Vec<i64>>,
    pub tag_ids: Option<Vec<i64>>,
    pub featured_image: Option<UploadedFile>,
    pub media: Vec<UploadedFile>,
    pub remove_media_ids: Vec<i64>,
}

impl UpdateContentCommand {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            title: None,
            body: None,
            excerpt: None,
            status: None,
            meta: None,
            category_ids: None,
            tag_ids: None,
            featured_image: None,
            media: Vec::new(),
            remove_media_ids: Vec::new(),
        }
    }
}

impl ContentCommandService {
    pub async fn update_content(
        &self,
        command: UpdateContentCommand,
    ) -> ApplicationResult<ContentDto> {
        let id = ContentId::new(command.id)?;
        let current = self
            .read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("content not found"))?;

        let now = self.clock.now();
        let mut update = ContentUpdate::new(id, now);

        if let Some(title) = command.title {
            let title = ContentTitle::new(title)?;
            // Only a changed title earns a new slug.
            if title.as_str() != current.title.as_str() {
                let slug = self
                    .slug_service
                    .generate_unique_slug(&title, Some(id))
                    .await?;
                update = update.with_slug(slug);
            }
            update = update.with_title(title);
        }

        if let Some(body) = command.body {
            update = update.with_body(ContentBody::new(body)?);
        }

        if let Some(excerpt) = command.excerpt {
            update = update.with_excerpt(excerpt);
        }

        if let Some(status) = command.status {
            // Entering PUBLISHED from a non-published state stamps the
            // timestamp; any other transition leaves it as-is.
            let published_at = if status == ContentStatus::Published
                && current.status != ContentStatus::Published
            {
                Some(now)
            } else {
                None
            };
            update = update.with_status(status, published_at);
        }

        if let Some(meta) = command.meta {
            update = update.with_meta(meta);
        }

        if let Some(ids) = command.category_ids {
            update = update.with_categories(
                ids.into_iter()
                    .map(CategoryId::new)
                    .collect::<DomainResult<Vec<_>>>()?,
            );
        }

        if let Some(ids) = command.tag_ids {
            update = update.with_tags(
                ids.into_iter()
                    .map(TagId::new)
                    .collect::<DomainResult<Vec<_>>>()?,
            );
        }

        for raw in command.remove_media_ids {
            update = update.remove_media(MediaId::new(raw)?);
        }

        // Nothing to change and no files in flight: skip the write and leave
        // the cache untouched.
        if update.is_noop() && command.featured_image.is_none() && command.media.is_empty() {
            return self.load_with_relations(id).await;
        }

        let replaced_featured = if command.featured_image.is_some() {
            current.featured_image.clone()
        } else {
            None
        };

        let mut staged: Vec<String> = Vec::new();
        let outcome = match self
            .update_inner(&mut staged, update, command.featured_image, command.media)
            .await
        {
            Ok(outcome) => outcome,
            Err(err) => {
                self.remove_stored_files(&staged).await;
                return Err(err);
            }
        };

        // The transaction committed; now retire files whose rows are gone.
        if let Some(old_path) = replaced_featured {
            self.remove_stored_files(&[old_path]).await;
        }
        self.remove_stored_files(&outcome.removed_media_paths).await;

        tracing::info!(content_id = i64::from(id), slug = %outcome.content.slug, "content updated");
        self.invalidate_after_mutation(id, Some(&current.slug))
            .await?;
        if outcome.content.slug != current.slug {
            self.cache
                .invalidate_entity(&entity_slug_key(outcome.content.slug.as_str()))
                .await?;
        }

        self.load_with_relations(id).await
    }

    async fn update_inner(
        &self,
        staged: &mut Vec<String>,
        mut update: ContentUpdate,
        featured_image: Option<UploadedFile>,
        media_files: Vec<UploadedFile>,
    ) -> ApplicationResult<UpdateOutcome> {
        if let Some(file) = &featured_image {
            let path = self.stage_upload(file, staged).await?;
            update = update.with_featured_image(path);
        }
        for file in &media_files {
            let path = self.stage_upload(file, staged).await?;
            update = update.add_media(Self::media_record(file, path));
        }
        Ok(self.write_repo.update(update).await?)
    }
}
