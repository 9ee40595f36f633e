// tests/support/mocks/repos.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use kiji_core::domain::content::{
    Content, ContentFilter, ContentId, ContentReadRepository, ContentSlug, ContentStatus,
    ContentUpdate, ContentWithRelations, NewContent, Page, SortDirection, SortField,
    UpdateOutcome,
};
use kiji_core::domain::content::repository::ContentWriteRepository;
use kiji_core::domain::errors::{DomainError, DomainResult};
use kiji_core::domain::media::{Media, MediaId};
use kiji_core::domain::taxonomy::{Category, CategoryId, Tag, TagId};
use kiji_core::domain::user::{Author, UserId};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Default)]
struct State {
    contents: BTreeMap<i64, Content>,
    categories_by_content: BTreeMap<i64, BTreeSet<i64>>,
    tags_by_content: BTreeMap<i64, BTreeSet<i64>>,
    media: BTreeMap<i64, Media>,
    authors: BTreeMap<i64, Author>,
    categories: BTreeMap<i64, Category>,
    tags: BTreeMap<i64, Tag>,
    next_content_id: i64,
    next_media_id: i64,
}

/// In-memory content store implementing both repository sides over one state,
/// with the same observable semantics as the Postgres implementation: live
/// rows only, unique slugs among live rows, replace-all association sync.
#[derive(Default)]
pub struct InMemoryContentRepository {
    state: Mutex<State>,
    list_queries: AtomicU64,
    relation_loads: AtomicU64,
    fail_next_write: AtomicBool,
    conflict_next_insert: AtomicBool,
}

impl InMemoryContentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_author(&self, id: i64, username: &str) {
        let mut state = self.state.lock().unwrap();
        state.authors.insert(
            id,
            Author {
                id: UserId::new(id).unwrap(),
                username: username.to_owned(),
                display_name: None,
            },
        );
    }

    pub fn seed_category(&self, id: i64, name: &str, slug: &str) {
        let mut state = self.state.lock().unwrap();
        state.categories.insert(
            id,
            Category {
                id: CategoryId::new(id).unwrap(),
                name: name.to_owned(),
                slug: slug.to_owned(),
            },
        );
    }

    pub fn seed_tag(&self, id: i64, name: &str, slug: &str) {
        let mut state = self.state.lock().unwrap();
        state.tags.insert(
            id,
            Tag {
                id: TagId::new(id).unwrap(),
                name: name.to_owned(),
                slug: slug.to_owned(),
            },
        );
    }

    /// Number of list queries that reached the repository (cache misses).
    pub fn list_queries(&self) -> u64 {
        self.list_queries.load(Ordering::SeqCst)
    }

    /// Number of eager-loaded single-row reads that reached the repository.
    pub fn relation_loads(&self) -> u64 {
        self.relation_loads.load(Ordering::SeqCst)
    }

    /// Make the next insert/update fail with a persistence error.
    pub fn fail_next_write(&self) {
        self.fail_next_write.store(true, Ordering::SeqCst);
    }

    /// Make the next insert fail with a slug conflict, as a racing writer
    /// hitting the unique index would.
    pub fn conflict_next_insert(&self) {
        self.conflict_next_insert.store(true, Ordering::SeqCst);
    }

    pub fn category_ids_of(&self, content_id: i64) -> Vec<i64> {
        let state = self.state.lock().unwrap();
        state
            .categories_by_content
            .get(&content_id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn tag_ids_of(&self, content_id: i64) -> Vec<i64> {
        let state = self.state.lock().unwrap();
        state
            .tags_by_content
            .get(&content_id)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn stored_content(&self, content_id: i64) -> Option<Content> {
        let state = self.state.lock().unwrap();
        state.contents.get(&content_id).cloned()
    }

    fn live<'a>(state: &'a State) -> impl Iterator<Item = &'a Content> {
        state.contents.values().filter(|c| !c.is_deleted())
    }

    fn slug_taken(state: &State, slug: &str, ignore_id: Option<i64>) -> bool {
        Self::live(state).any(|c| {
            c.slug.as_str() == slug && ignore_id.is_none_or(|id| i64::from(c.id) != id)
        })
    }

    fn with_relations(state: &State, content: Content) -> DomainResult<ContentWithRelations> {
        let id_raw = i64::from(content.id);
        let author = state
            .authors
            .get(&i64::from(content.author_id))
            .cloned()
            .ok_or_else(|| {
                DomainError::Persistence(format!("author missing for content {id_raw}"))
            })?;
        let categories = state
            .categories_by_content
            .get(&id_raw)
            .map(|set| {
                set.iter()
                    .filter_map(|id| state.categories.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        let tags = state
            .tags_by_content
            .get(&id_raw)
            .map(|set| {
                set.iter()
                    .filter_map(|id| state.tags.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        let media = state
            .media
            .values()
            .filter(|m| m.content_id == content.id)
            .cloned()
            .collect();
        Ok(ContentWithRelations {
            content,
            author,
            categories,
            tags,
            media,
        })
    }

    fn matches(state: &State, content: &Content, filter: &ContentFilter) -> bool {
        let id_raw = i64::from(content.id);
        if let Some(category_id) = filter.category_id {
            let member = state
                .categories_by_content
                .get(&id_raw)
                .is_some_and(|set| set.contains(&i64::from(category_id)));
            if !member {
                return false;
            }
        }
        if let Some(tag_id) = filter.tag_id {
            let member = state
                .tags_by_content
                .get(&id_raw)
                .is_some_and(|set| set.contains(&i64::from(tag_id)));
            if !member {
                return false;
            }
        }
        if let Some(author_id) = filter.author_id
            && content.author_id != author_id
        {
            return false;
        }
        if let Some(content_type) = filter.content_type
            && content.content_type != content_type
        {
            return false;
        }
        if let Some(status) = filter.status
            && content.status != status
        {
            return false;
        }
        if let Some(term) = filter.search_term() {
            let needle = term.to_lowercase();
            let hit = content.title.as_str().to_lowercase().contains(&needle)
                || content.body.as_str().to_lowercase().contains(&needle)
                || content.slug.as_str().to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        true
    }

    fn sort(rows: &mut [Content], sort_by: SortField, direction: SortDirection) {
        rows.sort_by(|a, b| {
            let ord = match sort_by {
                SortField::PublishedAt => a.published_at.cmp(&b.published_at),
                SortField::CreatedAt => a.created_at.cmp(&b.created_at),
                SortField::Title => a.title.as_str().cmp(b.title.as_str()),
            };
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }

    fn paginate(rows: Vec<Content>, per_page: u32, page: u32) -> (Vec<Content>, u64) {
        let total = rows.len() as u64;
        let offset = (page.max(1) - 1) as usize * per_page as usize;
        let items = rows
            .into_iter()
            .skip(offset)
            .take(per_page as usize)
            .collect();
        (items, total)
    }

    fn taxonomy_rows(
        &self,
        member: impl Fn(&State, i64) -> bool,
        per_page: u32,
        page: u32,
    ) -> DomainResult<Page<ContentWithRelations>> {
        let state = self.state.lock().unwrap();
        let mut rows: Vec<Content> = Self::live(&state)
            .filter(|c| member(&state, i64::from(c.id)))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(i64::from(b.id).cmp(&i64::from(a.id)))
        });
        let (items, total) = Self::paginate(rows, per_page, page);
        let items = items
            .into_iter()
            .map(|c| Self::with_relations(&state, c))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Page {
            items,
            total,
            per_page,
            current_page: page.max(1),
        })
    }
}

#[async_trait]
impl ContentWriteRepository for InMemoryContentRepository {
    async fn insert(&self, content: NewContent) -> DomainResult<Content> {
        if self.fail_next_write.swap(false, Ordering::SeqCst) {
            return Err(DomainError::Persistence("injected write failure".into()));
        }
        if self.conflict_next_insert.swap(false, Ordering::SeqCst) {
            return Err(DomainError::Conflict("slug already exists".into()));
        }

        let mut state = self.state.lock().unwrap();
        if Self::slug_taken(&state, content.slug.as_str(), None) {
            return Err(DomainError::Conflict("slug already exists".into()));
        }

        state.next_content_id += 1;
        let id_raw = state.next_content_id;
        let stored = Content {
            id: ContentId::new(id_raw)?,
            title: content.title,
            slug: content.slug,
            body: content.body,
            excerpt: content.excerpt,
            content_type: content.content_type,
            status: content.status,
            author_id: content.author_id,
            published_at: content.published_at,
            featured_image: content.featured_image,
            meta: content.meta,
            created_at: content.created_at,
            updated_at: content.updated_at,
            deleted_at: None,
        };
        state.contents.insert(id_raw, stored.clone());
        state.categories_by_content.insert(
            id_raw,
            content.category_ids.iter().copied().map(i64::from).collect(),
        );
        state
            .tags_by_content
            .insert(id_raw, content.tag_ids.iter().copied().map(i64::from).collect());
        for record in content.media {
            state.next_media_id += 1;
            let media_id = state.next_media_id;
            state.media.insert(
                media_id,
                Media {
                    id: MediaId::new(media_id)?,
                    content_id: stored.id,
                    filename: record.filename,
                    original_name: record.original_name,
                    mime_type: record.mime_type,
                    size: record.size,
                    path: record.path,
                    alt_text: record.alt_text,
                    created_at: content.created_at,
                    updated_at: content.created_at,
                },
            );
        }
        Ok(stored)
    }

    async fn update(&self, update: ContentUpdate) -> DomainResult<UpdateOutcome> {
        if self.fail_next_write.swap(false, Ordering::SeqCst) {
            return Err(DomainError::Persistence("injected write failure".into()));
        }

        let mut state = self.state.lock().unwrap();
        let id_raw = i64::from(update.id);

        if let Some(slug) = &update.slug
            && Self::slug_taken(&state, slug.as_str(), Some(id_raw))
        {
            return Err(DomainError::Conflict("slug already exists".into()));
        }

        {
            let content = state
                .contents
                .get_mut(&id_raw)
                .filter(|c| !c.is_deleted())
                .ok_or_else(|| DomainError::NotFound("content not found".into()))?;

            if let Some(title) = update.title {
                content.title = title;
            }
            if let Some(slug) = update.slug {
                content.slug = slug;
            }
            if let Some(body) = update.body {
                content.body = body;
            }
            if let Some(excerpt) = update.excerpt {
                content.excerpt = Some(excerpt);
            }
            if let Some(state_change) = update.status_update {
                content.status = state_change.status;
                if let Some(published_at) = state_change.published_at {
                    content.published_at = Some(published_at);
                }
            }
            if let Some(path) = update.featured_image {
                content.featured_image = Some(path);
            }
            if let Some(meta) = update.meta {
                content.meta = meta;
            }
            content.updated_at = update.updated_at;
        }

        if let Some(ids) = update.category_ids {
            state
                .categories_by_content
                .insert(id_raw, ids.into_iter().map(i64::from).collect());
        }
        if let Some(ids) = update.tag_ids {
            state
                .tags_by_content
                .insert(id_raw, ids.into_iter().map(i64::from).collect());
        }

        let content_id = ContentId::new(id_raw)?;
        for record in update.new_media {
            state.next_media_id += 1;
            let media_id = state.next_media_id;
            state.media.insert(
                media_id,
                Media {
                    id: MediaId::new(media_id)?,
                    content_id,
                    filename: record.filename,
                    original_name: record.original_name,
                    mime_type: record.mime_type,
                    size: record.size,
                    path: record.path,
                    alt_text: record.alt_text,
                    created_at: update.updated_at,
                    updated_at: update.updated_at,
                },
            );
        }

        let mut removed_media_paths = Vec::new();
        for media_id in update.remove_media {
            if let Some(removed) = state.media.remove(&i64::from(media_id)) {
                removed_media_paths.push(removed.path);
            }
        }

        let content = state.contents[&id_raw].clone();
        Ok(UpdateOutcome {
            content,
            removed_media_paths,
        })
    }

    async fn soft_delete(&self, id: ContentId, now: DateTime<Utc>) -> DomainResult<bool> {
        let mut state = self.state.lock().unwrap();
        match state
            .contents
            .get_mut(&i64::from(id))
            .filter(|c| !c.is_deleted())
        {
            Some(content) => {
                content.deleted_at = Some(now);
                content.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_status(
        &self,
        id: ContentId,
        status: ContentStatus,
        published_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> DomainResult<Content> {
        let mut state = self.state.lock().unwrap();
        let content = state
            .contents
            .get_mut(&i64::from(id))
            .filter(|c| !c.is_deleted())
            .ok_or_else(|| DomainError::NotFound("content not found".into()))?;
        content.status = status;
        if let Some(published_at) = published_at {
            content.published_at = Some(published_at);
        }
        content.updated_at = now;
        Ok(content.clone())
    }

    async fn sync_tags(&self, id: ContentId, tag_ids: &[TagId]) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        state
            .tags_by_content
            .insert(i64::from(id), tag_ids.iter().copied().map(i64::from).collect());
        Ok(())
    }

    async fn sync_categories(
        &self,
        id: ContentId,
        category_ids: &[CategoryId],
    ) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        state.categories_by_content.insert(
            i64::from(id),
            category_ids.iter().copied().map(i64::from).collect(),
        );
        Ok(())
    }
}

#[async_trait]
impl ContentReadRepository for InMemoryContentRepository {
    async fn find_by_id(&self, id: ContentId) -> DomainResult<Option<Content>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .contents
            .get(&i64::from(id))
            .filter(|c| !c.is_deleted())
            .cloned())
    }

    async fn find_by_slug(&self, slug: &ContentSlug) -> DomainResult<Option<Content>> {
        let state = self.state.lock().unwrap();
        Ok(Self::live(&state)
            .find(|c| c.slug.as_str() == slug.as_str())
            .cloned())
    }

    async fn find_by_id_with_relations(
        &self,
        id: ContentId,
    ) -> DomainResult<Option<ContentWithRelations>> {
        self.relation_loads.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        state
            .contents
            .get(&i64::from(id))
            .filter(|c| !c.is_deleted())
            .cloned()
            .map(|c| Self::with_relations(&state, c))
            .transpose()
    }

    async fn find_by_slug_with_relations(
        &self,
        slug: &ContentSlug,
    ) -> DomainResult<Option<ContentWithRelations>> {
        self.relation_loads.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        Self::live(&state)
            .find(|c| c.slug.as_str() == slug.as_str())
            .cloned()
            .map(|c| Self::with_relations(&state, c))
            .transpose()
    }

    async fn get_paginated(
        &self,
        filter: &ContentFilter,
    ) -> DomainResult<Page<ContentWithRelations>> {
        self.list_queries.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        let mut rows: Vec<Content> = Self::live(&state)
            .filter(|c| Self::matches(&state, c, filter))
            .cloned()
            .collect();
        Self::sort(&mut rows, filter.sort_by, filter.sort_direction);
        let (items, total) = Self::paginate(rows, filter.per_page, filter.page);
        let items = items
            .into_iter()
            .map(|c| Self::with_relations(&state, c))
            .collect::<DomainResult<Vec<_>>>()?;
        Ok(Page {
            items,
            total,
            per_page: filter.per_page,
            current_page: filter.page.max(1),
        })
    }

    async fn get_paginated_by_category_id(
        &self,
        category_id: CategoryId,
        per_page: u32,
        page: u32,
    ) -> DomainResult<Page<ContentWithRelations>> {
        let raw = i64::from(category_id);
        self.taxonomy_rows(
            move |state, content_id| {
                state
                    .categories_by_content
                    .get(&content_id)
                    .is_some_and(|set| set.contains(&raw))
            },
            per_page,
            page,
        )
    }

    async fn get_paginated_by_category_slug(
        &self,
        category_slug: &str,
        per_page: u32,
        page: u32,
    ) -> DomainResult<Page<ContentWithRelations>> {
        let slug = category_slug.to_owned();
        self.taxonomy_rows(
            move |state, content_id| {
                state
                    .categories_by_content
                    .get(&content_id)
                    .is_some_and(|set| {
                        set.iter().any(|id| {
                            state
                                .categories
                                .get(id)
                                .is_some_and(|category| category.slug == slug)
                        })
                    })
            },
            per_page,
            page,
        )
    }

    async fn get_paginated_by_tag_id(
        &self,
        tag_id: TagId,
        per_page: u32,
        page: u32,
    ) -> DomainResult<Page<ContentWithRelations>> {
        let raw = i64::from(tag_id);
        self.taxonomy_rows(
            move |state, content_id| {
                state
                    .tags_by_content
                    .get(&content_id)
                    .is_some_and(|set| set.contains(&raw))
            },
            per_page,
            page,
        )
    }

    async fn get_paginated_by_tag_slug(
        &self,
        tag_slug: &str,
        per_page: u32,
        page: u32,
    ) -> DomainResult<Page<ContentWithRelations>> {
        let slug = tag_slug.to_owned();
        self.taxonomy_rows(
            move |state, content_id| {
                state
                    .tags_by_content
                    .get(&content_id)
                    .is_some_and(|set| {
                        set.iter()
                            .any(|id| state.tags.get(id).is_some_and(|tag| tag.slug == slug))
                    })
            },
            per_page,
            page,
        )
    }
}
