// src/infrastructure/repositories/postgres_content.rs
use super::map_sqlx;
use crate::domain::content::{
    Content, ContentBody, ContentFilter, ContentId, ContentMeta, ContentReadRepository,
    ContentSlug, ContentStatus, ContentTitle, ContentType, ContentUpdate, ContentWithRelations,
    NewContent, Page, SortDirection, SortField, UpdateOutcome,
};
use crate::domain::content::repository::ContentWriteRepository;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::media::{Media, MediaId, NewMedia};
use crate::domain::taxonomy::{Category, CategoryId, Tag, TagId};
use crate::domain::user::{Author, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction, types::Json};
use std::collections::HashMap;

const CONTENT_COLUMNS: &str = "id, title, slug, body, excerpt, content_type, status, author_id, \
     published_at, featured_image, meta, created_at, updated_at, deleted_at";

#[derive(Clone)]
pub struct PostgresContentWriteRepository {
    pool: PgPool,
}

impl PostgresContentWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresContentReadRepository {
    pool: PgPool,
}

impl PostgresContentReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ContentRow {
    id: i64,
    title: String,
    slug: String,
    body: String,
    excerpt: Option<String>,
    content_type: String,
    status: String,
    author_id: i64,
    published_at: Option<DateTime<Utc>>,
    featured_image: Option<String>,
    meta: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<ContentRow> for Content {
    type Error = DomainError;

    fn try_from(row: ContentRow) -> Result<Self, Self::Error> {
        let meta = if row.meta.is_null() {
            ContentMeta::default()
        } else {
            serde_json::from_value(row.meta)
                .map_err(|err| DomainError::Persistence(format!("invalid meta column: {err}")))?
        };
        Ok(Content {
            id: ContentId::new(row.id)?,
            title: ContentTitle::new(row.title)?,
            slug: ContentSlug::new(row.slug)?,
            body: ContentBody::new(row.body)?,
            excerpt: row.excerpt,
            content_type: ContentType::parse(&row.content_type)?,
            status: ContentStatus::parse(&row.status)?,
            author_id: UserId::new(row.author_id)?,
            published_at: row.published_at,
            featured_image: row.featured_image,
            meta,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct AuthorRow {
    id: i64,
    username: String,
    display_name: Option<String>,
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    content_id: i64,
    id: i64,
    name: String,
    slug: String,
}

#[derive(Debug, FromRow)]
struct TagRow {
    content_id: i64,
    id: i64,
    name: String,
    slug: String,
}

#[derive(Debug, FromRow)]
struct MediaRow {
    id: i64,
    content_id: i64,
    filename: String,
    original_name: String,
    mime_type: String,
    size: i64,
    path: String,
    alt_text: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MediaRow> for Media {
    type Error = DomainError;

    fn try_from(row: MediaRow) -> Result<Self, Self::Error> {
        Ok(Media {
            id: MediaId::new(row.id)?,
            content_id: ContentId::new(row.content_id)?,
            filename: row.filename,
            original_name: row.original_name,
            mime_type: row.mime_type,
            size: row.size,
            path: row.path,
            alt_text: row.alt_text,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Replace the tag set for one content row: drop pairs outside the new set,
/// insert missing ones, leave matches alone.
async fn sync_tag_rows(
    tx: &mut Transaction<'_, Postgres>,
    content_id: i64,
    tag_ids: &[i64],
) -> DomainResult<()> {
    sqlx::query("DELETE FROM content_tag WHERE content_id = $1 AND tag_id <> ALL($2)")
        .bind(content_id)
        .bind(tag_ids.to_vec())
        .execute(&mut **tx)
        .await
        .map_err(map_sqlx)?;
    if !tag_ids.is_empty() {
        sqlx::query(
            "INSERT INTO content_tag (content_id, tag_id)
             SELECT $1, t FROM unnest($2::bigint[]) AS t
             ON CONFLICT DO NOTHING",
        )
        .bind(content_id)
        .bind(tag_ids.to_vec())
        .execute(&mut **tx)
        .await
        .map_err(map_sqlx)?;
    }
    Ok(())
}

async fn sync_category_rows(
    tx: &mut Transaction<'_, Postgres>,
    content_id: i64,
    category_ids: &[i64],
) -> DomainResult<()> {
    sqlx::query("DELETE FROM content_category WHERE content_id = $1 AND category_id <> ALL($2)")
        .bind(content_id)
        .bind(category_ids.to_vec())
        .execute(&mut **tx)
        .await
        .map_err(map_sqlx)?;
    if !category_ids.is_empty() {
        sqlx::query(
            "INSERT INTO content_category (content_id, category_id)
             SELECT $1, c FROM unnest($2::bigint[]) AS c
             ON CONFLICT DO NOTHING",
        )
        .bind(content_id)
        .bind(category_ids.to_vec())
        .execute(&mut **tx)
        .await
        .map_err(map_sqlx)?;
    }
    Ok(())
}

async fn insert_media_rows(
    tx: &mut Transaction<'_, Postgres>,
    content_id: i64,
    media: &[NewMedia],
    now: DateTime<Utc>,
) -> DomainResult<()> {
    for record in media {
        sqlx::query(
            "INSERT INTO media (content_id, filename, original_name, mime_type, size, path, alt_text, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)",
        )
        .bind(content_id)
        .bind(&record.filename)
        .bind(&record.original_name)
        .bind(&record.mime_type)
        .bind(record.size)
        .bind(&record.path)
        .bind(&record.alt_text)
        .bind(now)
        .execute(&mut **tx)
        .await
        .map_err(map_sqlx)?;
    }
    Ok(())
}

#[async_trait]
impl ContentWriteRepository for PostgresContentWriteRepository {
    async fn insert(&self, content: NewContent) -> DomainResult<Content> {
        let NewContent {
            title,
            slug,
            body,
            excerpt,
            content_type,
            status,
            author_id,
            published_at,
            featured_image,
            meta,
            category_ids,
            tag_ids,
            media,
            created_at,
            updated_at,
        } = content;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, ContentRow>(
            "INSERT INTO contents (title, slug, body, excerpt, content_type, status, author_id, published_at, featured_image, meta, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING id, title, slug, body, excerpt, content_type, status, author_id, published_at, featured_image, meta, created_at, updated_at, deleted_at",
        )
        .bind(title.as_str())
        .bind(slug.as_str())
        .bind(body.as_str())
        .bind(&excerpt)
        .bind(content_type.as_str())
        .bind(status.as_str())
        .bind(i64::from(author_id))
        .bind(published_at)
        .bind(&featured_image)
        .bind(Json(meta))
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        let raw_categories: Vec<i64> = category_ids.into_iter().map(i64::from).collect();
        let raw_tags: Vec<i64> = tag_ids.into_iter().map(i64::from).collect();
        if !raw_categories.is_empty() {
            sync_category_rows(&mut tx, row.id, &raw_categories).await?;
        }
        if !raw_tags.is_empty() {
            sync_tag_rows(&mut tx, row.id, &raw_tags).await?;
        }
        insert_media_rows(&mut tx, row.id, &media, created_at).await?;

        tx.commit().await.map_err(map_sqlx)?;
        Content::try_from(row)
    }

    async fn update(&self, update: ContentUpdate) -> DomainResult<UpdateOutcome> {
        let ContentUpdate {
            id,
            title,
            slug,
            body,
            excerpt,
            status_update,
            featured_image,
            meta,
            category_ids,
            tag_ids,
            new_media,
            remove_media,
            updated_at,
        } = update;
        let id_raw = i64::from(id);

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE contents SET updated_at = ");
        builder.push_bind(updated_at);

        if let Some(title) = title {
            builder.push(", title = ");
            builder.push_bind(String::from(title));
        }
        if let Some(slug) = slug {
            builder.push(", slug = ");
            builder.push_bind(String::from(slug));
        }
        if let Some(body) = body {
            builder.push(", body = ");
            builder.push_bind(String::from(body));
        }
        if let Some(excerpt) = excerpt {
            builder.push(", excerpt = ");
            builder.push_bind(excerpt);
        }
        if let Some(state) = status_update {
            builder.push(", status = ");
            builder.push_bind(state.status.as_str());
            if let Some(published_at) = state.published_at {
                builder.push(", published_at = ");
                builder.push_bind(published_at);
            }
        }
        if let Some(path) = featured_image {
            builder.push(", featured_image = ");
            builder.push_bind(path);
        }
        if let Some(meta) = meta {
            builder.push(", meta = ");
            builder.push_bind(Json(meta));
        }

        builder.push(" WHERE id = ");
        builder.push_bind(id_raw);
        builder.push(" AND deleted_at IS NULL RETURNING ");
        builder.push(CONTENT_COLUMNS);

        let row = builder
            .build_query_as::<ContentRow>()
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("content not found".into()))?;

        if let Some(ids) = category_ids {
            let raw: Vec<i64> = ids.into_iter().map(i64::from).collect();
            sync_category_rows(&mut tx, id_raw, &raw).await?;
        }
        if let Some(ids) = tag_ids {
            let raw: Vec<i64> = ids.into_iter().map(i64::from).collect();
            sync_tag_rows(&mut tx, id_raw, &raw).await?;
        }
        insert_media_rows(&mut tx, id_raw, &new_media, updated_at).await?;

        let mut removed_media_paths = Vec::new();
        if !remove_media.is_empty() {
            let ids: Vec<i64> = remove_media.into_iter().map(i64::from).collect();
            removed_media_paths = sqlx::query_scalar::<_, String>(
                "DELETE FROM media WHERE content_id = $1 AND id = ANY($2) RETURNING path",
            )
            .bind(id_raw)
            .bind(ids)
            .fetch_all(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(UpdateOutcome {
            content: Content::try_from(row)?,
            removed_media_paths,
        })
    }

    async fn soft_delete(&self, id: ContentId, now: DateTime<Utc>) -> DomainResult<bool> {
        let result = sqlx::query(
            "UPDATE contents SET deleted_at = $2, updated_at = $2
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(i64::from(id))
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_status(
        &self,
        id: ContentId,
        status: ContentStatus,
        published_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> DomainResult<Content> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE contents SET updated_at = ");
        builder.push_bind(now);
        builder.push(", status = ");
        builder.push_bind(status.as_str());
        if let Some(published_at) = published_at {
            builder.push(", published_at = ");
            builder.push_bind(published_at);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(i64::from(id));
        builder.push(" AND deleted_at IS NULL RETURNING ");
        builder.push(CONTENT_COLUMNS);

        let row = builder
            .build_query_as::<ContentRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?
            .ok_or_else(|| DomainError::NotFound("content not found".into()))?;

        Content::try_from(row)
    }

    async fn sync_tags(&self, id: ContentId, tag_ids: &[TagId]) -> DomainResult<()> {
        let raw: Vec<i64> = tag_ids.iter().copied().map(i64::from).collect();
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        sync_tag_rows(&mut tx, i64::from(id), &raw).await?;
        tx.commit().await.map_err(map_sqlx)
    }

    async fn sync_categories(
        &self,
        id: ContentId,
        category_ids: &[CategoryId],
    ) -> DomainResult<()> {
        let raw: Vec<i64> = category_ids.iter().copied().map(i64::from).collect();
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        sync_category_rows(&mut tx, i64::from(id), &raw).await?;
        tx.commit().await.map_err(map_sqlx)
    }
}

enum TaxonomyRef<'a> {
    CategoryId(i64),
    CategorySlug(&'a str),
    TagId(i64),
    TagSlug(&'a str),
}

impl PostgresContentReadRepository {
    fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &ContentFilter) {
        builder.push(" WHERE deleted_at IS NULL");

        if let Some(category_id) = filter.category_id {
            builder.push(
                " AND EXISTS (SELECT 1 FROM content_category cc \
                 WHERE cc.content_id = contents.id AND cc.category_id = ",
            );
            builder.push_bind(i64::from(category_id));
            builder.push(")");
        }
        if let Some(tag_id) = filter.tag_id {
            builder.push(
                " AND EXISTS (SELECT 1 FROM content_tag ct \
                 WHERE ct.content_id = contents.id AND ct.tag_id = ",
            );
            builder.push_bind(i64::from(tag_id));
            builder.push(")");
        }
        if let Some(author_id) = filter.author_id {
            builder.push(" AND author_id = ");
            builder.push_bind(i64::from(author_id));
        }
        if let Some(content_type) = filter.content_type {
            builder.push(" AND content_type = ");
            builder.push_bind(content_type.as_str());
        }
        if let Some(status) = filter.status {
            builder.push(" AND status = ");
            builder.push_bind(status.as_str());
        }
        if let Some(term) = filter.search_term() {
            // Full-text over the body; the title/slug substring arm is always
            // OR'd in regardless.
            let pattern = format!("%{term}%");
            builder.push(" AND (to_tsvector('simple', body) @@ plainto_tsquery('simple', ");
            builder.push_bind(term.to_owned());
            builder.push(") OR title ILIKE ");
            builder.push_bind(pattern.clone());
            builder.push(" OR slug ILIKE ");
            builder.push_bind(pattern);
            builder.push(")");
        }
    }

    fn push_taxonomy_filter(builder: &mut QueryBuilder<'_, Postgres>, taxonomy: &TaxonomyRef<'_>) {
        builder.push(" WHERE deleted_at IS NULL AND EXISTS (");
        match taxonomy {
            TaxonomyRef::CategoryId(id) => {
                builder.push(
                    "SELECT 1 FROM content_category cc \
                     WHERE cc.content_id = contents.id AND cc.category_id = ",
                );
                builder.push_bind(*id);
            }
            TaxonomyRef::CategorySlug(slug) => {
                builder.push(
                    "SELECT 1 FROM content_category cc \
                     JOIN categories c ON c.id = cc.category_id \
                     WHERE cc.content_id = contents.id AND c.slug = ",
                );
                builder.push_bind((*slug).to_owned());
            }
            TaxonomyRef::TagId(id) => {
                builder.push(
                    "SELECT 1 FROM content_tag ct \
                     WHERE ct.content_id = contents.id AND ct.tag_id = ",
                );
                builder.push_bind(*id);
            }
            TaxonomyRef::TagSlug(slug) => {
                builder.push(
                    "SELECT 1 FROM content_tag ct \
                     JOIN tags t ON t.id = ct.tag_id \
                     WHERE ct.content_id = contents.id AND t.slug = ",
                );
                builder.push_bind((*slug).to_owned());
            }
        }
        builder.push(")");
    }

    fn map_optional(row: Option<ContentRow>) -> DomainResult<Option<Content>> {
        row.map(Content::try_from).transpose()
    }

    /// Batch-load author, category, tag and media rows for the given
    /// contents, preserving input order.
    async fn attach_relations(
        &self,
        contents: Vec<Content>,
    ) -> DomainResult<Vec<ContentWithRelations>> {
        if contents.is_empty() {
            return Ok(Vec::new());
        }

        let content_ids: Vec<i64> = contents.iter().map(|c| i64::from(c.id)).collect();
        let author_ids: Vec<i64> = contents.iter().map(|c| i64::from(c.author_id)).collect();

        let author_rows = sqlx::query_as::<_, AuthorRow>(
            "SELECT id, username, display_name FROM users WHERE id = ANY($1)",
        )
        .bind(author_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        let authors: HashMap<i64, Author> = author_rows
            .into_iter()
            .map(|row| {
                Ok::<_, DomainError>((
                    row.id,
                    Author {
                        id: UserId::new(row.id)?,
                        username: row.username,
                        display_name: row.display_name,
                    },
                ))
            })
            .collect::<Result<_, _>>()?;

        let category_rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT cc.content_id, c.id, c.name, c.slug
             FROM content_category cc
             JOIN categories c ON c.id = cc.category_id
             WHERE cc.content_id = ANY($1)
             ORDER BY c.name",
        )
        .bind(content_ids.clone())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        let mut categories: HashMap<i64, Vec<Category>> = HashMap::new();
        for row in category_rows {
            categories.entry(row.content_id).or_default().push(Category {
                id: CategoryId::new(row.id)?,
                name: row.name,
                slug: row.slug,
            });
        }

        let tag_rows = sqlx::query_as::<_, TagRow>(
            "SELECT ct.content_id, t.id, t.name, t.slug
             FROM content_tag ct
             JOIN tags t ON t.id = ct.tag_id
             WHERE ct.content_id = ANY($1)
             ORDER BY t.name",
        )
        .bind(content_ids.clone())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        let mut tags: HashMap<i64, Vec<Tag>> = HashMap::new();
        for row in tag_rows {
            tags.entry(row.content_id).or_default().push(Tag {
                id: TagId::new(row.id)?,
                name: row.name,
                slug: row.slug,
            });
        }

        let media_rows = sqlx::query_as::<_, MediaRow>(
            "SELECT id, content_id, filename, original_name, mime_type, size, path, alt_text, created_at, updated_at
             FROM media WHERE content_id = ANY($1) ORDER BY id",
        )
        .bind(content_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;
        let mut media: HashMap<i64, Vec<Media>> = HashMap::new();
        for row in media_rows {
            media
                .entry(row.content_id)
                .or_default()
                .push(Media::try_from(row)?);
        }

        contents
            .into_iter()
            .map(|content| {
                let id_raw = i64::from(content.id);
                let author = authors
                    .get(&i64::from(content.author_id))
                    .cloned()
                    .ok_or_else(|| {
                        DomainError::Persistence(format!(
                            "author {} missing for content {id_raw}",
                            i64::from(content.author_id)
                        ))
                    })?;
                Ok(ContentWithRelations {
                    author,
                    categories: categories.remove(&id_raw).unwrap_or_default(),
                    tags: tags.remove(&id_raw).unwrap_or_default(),
                    media: media.remove(&id_raw).unwrap_or_default(),
                    content,
                })
            })
            .collect()
    }

    async fn fetch_taxonomy_page(
        &self,
        taxonomy: TaxonomyRef<'_>,
        per_page: u32,
        page: u32,
    ) -> DomainResult<Page<ContentWithRelations>> {
        let mut count_builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM contents");
        Self::push_taxonomy_filter(&mut count_builder, &taxonomy);
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {CONTENT_COLUMNS} FROM contents"));
        Self::push_taxonomy_filter(&mut builder, &taxonomy);
        builder.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        builder.push_bind(i64::from(per_page));
        builder.push(" OFFSET ");
        builder.push_bind(i64::from(page.max(1) - 1) * i64::from(per_page));

        let rows = builder
            .build_query_as::<ContentRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        let contents = rows
            .into_iter()
            .map(Content::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let items = self.attach_relations(contents).await?;

        Ok(Page {
            items,
            total: u64::try_from(total).unwrap_or_default(),
            per_page,
            current_page: page.max(1),
        })
    }
}

#[async_trait]
impl ContentReadRepository for PostgresContentReadRepository {
    async fn find_by_id(&self, id: ContentId) -> DomainResult<Option<Content>> {
        let row = sqlx::query_as::<_, ContentRow>(
            "SELECT id, title, slug, body, excerpt, content_type, status, author_id, published_at, featured_image, meta, created_at, updated_at, deleted_at
             FROM contents WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Self::map_optional(row)
    }

    async fn find_by_slug(&self, slug: &ContentSlug) -> DomainResult<Option<Content>> {
        let row = sqlx::query_as::<_, ContentRow>(
            "SELECT id, title, slug, body, excerpt, content_type, status, author_id, published_at, featured_image, meta, created_at, updated_at, deleted_at
             FROM contents WHERE slug = $1 AND deleted_at IS NULL",
        )
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Self::map_optional(row)
    }

    async fn find_by_id_with_relations(
        &self,
        id: ContentId,
    ) -> DomainResult<Option<ContentWithRelations>> {
        let Some(content) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let mut loaded = self.attach_relations(vec![content]).await?;
        Ok(loaded.pop())
    }

    async fn find_by_slug_with_relations(
        &self,
        slug: &ContentSlug,
    ) -> DomainResult<Option<ContentWithRelations>> {
        let Some(content) = self.find_by_slug(slug).await? else {
            return Ok(None);
        };
        let mut loaded = self.attach_relations(vec![content]).await?;
        Ok(loaded.pop())
    }

    async fn get_paginated(
        &self,
        filter: &ContentFilter,
    ) -> DomainResult<Page<ContentWithRelations>> {
        let mut count_builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM contents");
        Self::push_filters(&mut count_builder, filter);
        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {CONTENT_COLUMNS} FROM contents"));
        Self::push_filters(&mut builder, filter);
        let mut order = format!(
            " ORDER BY {} {}",
            filter.sort_by.column(),
            filter.sort_direction.keyword()
        );
        // A null published_at (draft) sorts as the lowest value in both
        // directions; Postgres treats nulls as highest unless told otherwise.
        if filter.sort_by == SortField::PublishedAt {
            order.push_str(match filter.sort_direction {
                SortDirection::Asc => " NULLS FIRST",
                SortDirection::Desc => " NULLS LAST",
            });
        }
        builder.push(order);
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(filter.per_page));
        builder.push(" OFFSET ");
        builder.push_bind(filter.offset());

        let rows = builder
            .build_query_as::<ContentRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;
        let contents = rows
            .into_iter()
            .map(Content::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let items = self.attach_relations(contents).await?;

        Ok(Page {
            items,
            total: u64::try_from(total).unwrap_or_default(),
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
        self.fetch_taxonomy_page(TaxonomyRef::CategoryId(category_id.into()), per_page, page)
            .await
    }

    async fn get_paginated_by_category_slug(
        &self,
        category_slug: &str,
        per_page: u32,
        page: u32,
    ) -> DomainResult<Page<ContentWithRelations>> {
        self.fetch_taxonomy_page(TaxonomyRef::CategorySlug(category_slug), per_page, page)
            .await
    }

    async fn get_paginated_by_tag_id(
        &self,
        tag_id: TagId,
        per_page: u32,
        page: u32,
    ) -> DomainResult<Page<ContentWithRelations>> {
        self.fetch_taxonomy_page(TaxonomyRef::TagId(tag_id.into()), per_page, page)
            .await
    }

    async fn get_paginated_by_tag_slug(
        &self,
        tag_slug: &str,
        per_page: u32,
        page: u32,
    ) -> DomainResult<Page<ContentWithRelations>> {
        self.fetch_taxonomy_page(TaxonomyRef::TagSlug(tag_slug), per_page, page)
            .await
    }
}
