use crate::domain::content::entity::{Content, ContentUpdate, ContentWithRelations, NewContent};
use crate::domain::content::filter::ContentFilter;
use crate::domain::content::value_objects::{ContentId, ContentSlug, ContentStatus};
use crate::domain::errors::DomainResult;
use crate::domain::taxonomy::{CategoryId, TagId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// One page of a length-aware listing (1-indexed).
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub per_page: u32,
    pub current_page: u32,
}

impl<T> Page<T> {
    pub fn last_page(&self) -> u32 {
        if self.total == 0 {
            return 1;
        }
        let per_page = u64::from(self.per_page.max(1));
        u32::try_from(self.total.div_ceil(per_page)).unwrap_or(u32::MAX)
    }
}

/// Result of a transactional update: the fresh row plus the storage paths of
/// any media rows removed alongside it, so the caller can delete the files
/// after commit.
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    pub content: Content,
    pub removed_media_paths: Vec<String>,
}

#[async_trait]
pub trait ContentReadRepository: Send + Sync {
    async fn find_by_id(&self, id: ContentId) -> DomainResult<Option<Content>>;
    async fn find_by_slug(&self, slug: &ContentSlug) -> DomainResult<Option<Content>>;
    async fn find_by_id_with_relations(
        &self,
        id: ContentId,
    ) -> DomainResult<Option<ContentWithRelations>>;
    async fn find_by_slug_with_relations(
        &self,
        slug: &ContentSlug,
    ) -> DomainResult<Option<ContentWithRelations>>;
    async fn get_paginated(
        &self,
        filter: &ContentFilter,
    ) -> DomainResult<Page<ContentWithRelations>>;
    async fn get_paginated_by_category_id(
        &self,
        category_id: CategoryId,
        per_page: u32,
        page: u32,
    ) -> DomainResult<Page<ContentWithRelations>>;
    async fn get_paginated_by_category_slug(
        &self,
        category_slug: &str,
        per_page: u32,
        page: u32,
    ) -> DomainResult<Page<ContentWithRelations>>;
    async fn get_paginated_by_tag_id(
        &self,
        tag_id: TagId,
        per_page: u32,
        page: u32,
    ) -> DomainResult<Page<ContentWithRelations>>;
    async fn get_paginated_by_tag_slug(
        &self,
        tag_slug: &str,
        per_page: u32,
        page: u32,
    ) -> DomainResult<Page<ContentWithRelations>>;
}

#[async_trait]
pub trait ContentWriteRepository: Send + Sync {
    /// Insert the row together with its associations and media rows, all in
    /// one transaction.
    async fn insert(&self, content: NewContent) -> DomainResult<Content>;
    /// Apply a partial update plus association/media changes transactionally.
    async fn update(&self, update: ContentUpdate) -> DomainResult<UpdateOutcome>;
    /// Soft delete. Returns false when the id does not resolve to a live row.
    async fn soft_delete(&self, id: ContentId, now: DateTime<Utc>) -> DomainResult<bool>;
    /// Status transition. `published_at` of `None` leaves the stored
    /// timestamp untouched.
    async fn set_status(
        &self,
        id: ContentId,
        status: ContentStatus,
        published_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> DomainResult<Content>;
    /// Replace the tag set with exactly the given ids (idempotent).
    async fn sync_tags(&self, id: ContentId, tag_ids: &[TagId]) -> DomainResult<()>;
    /// Replace the category set with exactly the given ids (idempotent).
    async fn sync_categories(&self, id: ContentId, category_ids: &[CategoryId])
    -> DomainResult<()>;
}
