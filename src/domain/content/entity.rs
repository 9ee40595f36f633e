// src/domain/content/entity.rs
use crate::domain::content::value_objects::{
    ContentBody, ContentId, ContentMeta, ContentSlug, ContentStatus, ContentTitle, ContentType,
};
use crate::domain::media::{Media, MediaId, NewMedia};
use crate::domain::taxonomy::{Category, CategoryId, Tag, TagId};
use crate::domain::user::{Author, UserId};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Content {
    pub id: ContentId,
    pub title: ContentTitle,
    pub slug: ContentSlug,
    pub body: ContentBody,
    pub excerpt: Option<String>,
    pub content_type: ContentType,
    pub status: ContentStatus,
    pub author_id: UserId,
    pub published_at: Option<DateTime<Utc>>,
    pub featured_image: Option<String>,
    pub meta: ContentMeta,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Content {
    /// Publishing always restamps `published_at`, including re-publishes.
    pub fn publish(&mut self, now: DateTime<Utc>) {
        self.status = ContentStatus::Published;
        self.published_at = Some(now);
        self.updated_at = now;
    }

    /// Moving back to draft keeps `published_at` as a record of the last
    /// publication.
    pub fn draft(&mut self, now: DateTime<Utc>) {
        self.status = ContentStatus::Draft;
        self.updated_at = now;
    }

    pub fn archive(&mut self, now: DateTime<Utc>) {
        self.status = ContentStatus::Archived;
        self.updated_at = now;
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Content plus everything the response layer eager-loads with it.
#[derive(Debug, Clone)]
pub struct ContentWithRelations {
    pub content: Content,
    pub author: Author,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub media: Vec<Media>,
}

/// Insert payload. Associations and media rows ride along so the repository
/// can apply the whole mutation in one transaction.
#[derive(Debug, Clone)]
pub struct NewContent {
    pub title: ContentTitle,
    pub slug: ContentSlug,
    pub body: ContentBody,
    pub excerpt: Option<String>,
    pub content_type: ContentType,
    pub status: ContentStatus,
    pub author_id: UserId,
    pub published_at: Option<DateTime<Utc>>,
    pub featured_image: Option<String>,
    pub meta: ContentMeta,
    pub category_ids: Vec<CategoryId>,
    pub tag_ids: Vec<TagId>,
    pub media: Vec<NewMedia>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub status: ContentStatus,
    /// `None` leaves the stored `published_at` untouched.
    pub published_at: Option<DateTime<Utc>>,
}

/// Partial update payload. `None` fields stay untouched; association lists use
/// `Option<Vec<_>>` so callers can distinguish "leave alone" (`None`) from
/// "replace with exactly this set" (`Some`, empty set clears).
#[derive(Debug, Clone)]
pub struct ContentUpdate {
    pub id: ContentId,
    pub title: Option<ContentTitle>,
    pub slug: Option<ContentSlug>,
    pub body: Option<ContentBody>,
    pub excerpt: Option<String>,
    pub status_update: Option<StatusUpdate>,
    pub featured_image: Option<String>,
    pub meta: Option<ContentMeta>,
    pub category_ids: Option<Vec<CategoryId>>,
    pub tag_ids: Option<Vec<TagId>>,
    pub new_media: Vec<NewMedia>,
    pub remove_media: Vec<MediaId>,
    pub updated_at: DateTime<Utc>,
}

impl ContentUpdate {
    pub fn new(id: ContentId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: None,
            slug: None,
            body: None,
            excerpt: None,
            status_update: None,
            featured_image: None,
            meta: None,
            category_ids: None,
            tag_ids: None,
            new_media: Vec::new(),
            remove_media: Vec::new(),
            updated_at,
        }
    }

    pub fn with_title(mut self, title: ContentTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_slug(mut self, slug: ContentSlug) -> Self {
        self.slug = Some(slug);
        self
    }

    pub fn with_body(mut self, body: ContentBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    pub fn with_status(
        mut self,
        status: ContentStatus,
        published_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.status_update = Some(StatusUpdate {
            status,
            published_at,
        });
        self
    }

    pub fn with_featured_image(mut self, path: impl Into<String>) -> Self {
        self.featured_image = Some(path.into());
        self
    }

    pub fn with_meta(mut self, meta: ContentMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn with_categories(mut self, category_ids: Vec<CategoryId>) -> Self {
        self.category_ids = Some(category_ids);
        self
    }

    pub fn with_tags(mut self, tag_ids: Vec<TagId>) -> Self {
        self.tag_ids = Some(tag_ids);
        self
    }

    pub fn add_media(mut self, media: NewMedia) -> Self {
        self.new_media.push(media);
        self
    }

    pub fn remove_media(mut self, id: MediaId) -> Self {
        self.remove_media.push(id);
        self
    }

    pub fn is_noop(&self) -> bool {
        self.title.is_none()
            && self.slug.is_none()
            && self.body.is_none()
            && self.excerpt.is_none()
            && self.status_update.is_none()
            && self.featured_image.is_none()
            && self.meta.is_none()
            && self.category_ids.is_none()
            && self.tag_ids.is_none()
            && self.new_media.is_empty()
            && self.remove_media.is_empty()
    }
}
