// src/application/commands/contents/create.rs
use super::ContentCommandService;
use crate::{
    application::{
        dto::ContentDto,
        error::ApplicationResult,
        ports::storage::UploadedFile,
    },
    domain::{
        content::{
            NewContent,
            events::ContentEvent,
            value_objects::{
                ContentBody, ContentMeta, ContentStatus, ContentTitle, ContentType,
            },
        },
        errors::{DomainError, DomainResult},
        media::NewMedia,
        taxonomy::{CategoryId, TagId},
        user::UserId,
    },
};
use chrono::{DateTime, Utc};

/// The slug service re-checks before every attempt, but check-then-insert can
/// still race; the unique index turns the loser into a conflict we retry.
const SLUG_INSERT_ATTEMPTS: u32 = 3;

pub struct CreateContentCommand {
    pub title: String,
    pub body: String,
    pub excerpt: Option<String>,
    pub content_type: ContentType,
    pub status: ContentStatus,
    pub category_ids: Vec<i64>,
    pub tag_ids: Vec<i64>,
    pub meta: ContentMeta,
    pub featured_image: Option<UploadedFile>,
    pub media: Vec<UploadedFile>,
}

impl CreateContentCommand {
    pub fn builder() -> CreateContentCommandBuilder {
        CreateContentCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct CreateContentCommandBuilder {
    title: Option<String>,
    body: Option<String>,
    excerpt: Option<String>,
    content_type: Option<ContentType>,
    status: Option<ContentStatus>,
    category_ids: Vec<i64>,
    tag_ids: Vec<i64>,
    meta: Option<ContentMeta>,
    featured_image: Option<UploadedFile>,
    media: Vec<UploadedFile>,
}

impl CreateContentCommandBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    pub fn status(mut self, status: ContentStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn category_ids(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.category_ids = ids.into_iter().collect();
        self
    }

    pub fn tag_ids(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.tag_ids = ids.into_iter().collect();
        self
    }

    pub fn meta(mut self, meta: ContentMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn featured_image(mut self, file: UploadedFile) -> Self {
        self.featured_image = Some(file);
        self
    }

    pub fn media(mut self, file: UploadedFile) -> Self {
        self.media.push(file);
        self
    }

    pub fn build(self) -> Result<CreateContentCommand, &'static str> {
        Ok(CreateContentCommand {
            title: self.title.ok_or("title is required")?,
            body: self.body.ok_or("body is required")?,
            excerpt: self.excerpt,
            content_type: self.content_type.unwrap_or(ContentType::Article),
            status: self.status.unwrap_or(ContentStatus::Draft),
            category_ids: self.category_ids,
            tag_ids: self.tag_ids,
            meta: self.meta.unwrap_or_default(),
            featured_image: self.featured_image,
            media: self.media,
        })
    }
}

struct PreparedCreate {
    author_id: UserId,
    title: ContentTitle,
    body: ContentBody,
    excerpt: Option<String>,
    content_type: ContentType,
    status: ContentStatus,
    published_at: Option<DateTime<Utc>>,
    meta: ContentMeta,
    category_ids: Vec<CategoryId>,
    tag_ids: Vec<TagId>,
    featured_image: Option<UploadedFile>,
    media_files: Vec<UploadedFile>,
    now: DateTime<Utc>,
}

impl ContentCommandService {
    pub async fn create_content(
        &self,
        author_id: i64,
        command: CreateContentCommand,
    ) -> ApplicationResult<ContentDto> {
        let now = self.clock.now();
        let prepared = PreparedCreate {
            author_id: UserId::new(author_id)?,
            title: ContentTitle::new(command.title)?,
            body: ContentBody::new(command.body)?,
            excerpt: command.excerpt,
            content_type: command.content_type,
            status: command.status,
            published_at: match command.status {
                ContentStatus::Published => Some(now),
                ContentStatus::Draft | ContentStatus::Archived => None,
            },
            meta: command.meta,
            category_ids: command
                .category_ids
                .into_iter()
                .map(CategoryId::new)
                .collect::<DomainResult<Vec<_>>>()?,
            tag_ids: command
                .tag_ids
                .into_iter()
                .map(TagId::new)
                .collect::<DomainResult<Vec<_>>>()?,
            featured_image: command.featured_image,
            media_files: command.media,
            now,
        };

        let mut staged: Vec<String> = Vec::new();
        let created = match self.create_inner(&mut staged, prepared).await {
            Ok(created) => created,
            Err(err) => {
                // Files sit outside the transaction; clean up what we stored.
                self.remove_stored_files(&staged).await;
                return Err(err);
            }
        };

        tracing::info!(content_id = i64::from(created.id), slug = %created.slug, "content created");
        self.events.publish(ContentEvent::Created {
            id: created.id,
            author_id: created.author_id,
            at: now,
        });
        self.cache.invalidate_lists().await?;
        self.load_with_relations(created.id).await
    }

    async fn create_inner(
        &self,
        staged: &mut Vec<String>,
        prepared: PreparedCreate,
    ) -> ApplicationResult<crate::domain::content::Content> {
        let featured_path = match &prepared.featured_image {
            Some(file) => Some(self.stage_upload(file, staged).await?),
            None => None,
        };

        let mut media_records: Vec<NewMedia> = Vec::with_capacity(prepared.media_files.len());
        for file in &prepared.media_files {
            let path = self.stage_upload(file, staged).await?;
            media_records.push(Self::media_record(file, path));
        }

        let mut attempt = 0u32;
        loop {
            let slug = self
                .slug_service
                .generate_unique_slug(&prepared.title, None)
                .await?;
            let new_content = NewContent {
                title: prepared.title.clone(),
                slug,
                body: prepared.body.clone(),
                excerpt: prepared.excerpt.clone(),
                content_type: prepared.content_type,
                status: prepared.status,
                author_id: prepared.author_id,
                published_at: prepared.published_at,
                featured_image: featured_path.clone(),
                meta: prepared.meta,
                category_ids: prepared.category_ids.clone(),
                tag_ids: prepared.tag_ids.clone(),
                media: media_records.clone(),
                created_at: prepared.now,
                updated_at: prepared.now,
            };
            match self.write_repo.insert(new_content).await {
                Ok(created) => return Ok(created),
                Err(DomainError::Conflict(reason)) if attempt + 1 < SLUG_INSERT_ATTEMPTS => {
                    attempt += 1;
                    tracing::debug!(%reason, attempt, "insert conflict, regenerating slug");
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}
