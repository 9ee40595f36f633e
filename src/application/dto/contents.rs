use crate::domain::content::entity::ContentWithRelations;
use crate::domain::content::value_objects::{ContentMeta, ContentStatus, ContentType};
use crate::domain::media::Media;
use crate::domain::taxonomy::{Category, Tag};
use crate::domain::user::Author;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorDto {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        Self {
            id: author.id.into(),
            username: author.username,
            display_name: author.display_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.into(),
            name: category.name,
            slug: category.slug,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagDto {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl From<Tag> for TagDto {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id.into(),
            name: tag.name,
            slug: tag.slug,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaDto {
    pub id: i64,
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    pub path: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Media> for MediaDto {
    fn from(media: Media) -> Self {
        Self {
            id: media.id.into(),
            filename: media.filename,
            original_name: media.original_name,
            mime_type: media.mime_type,
            size: media.size,
            path: media.path,
            alt_text: media.alt_text,
            created_at: media.created_at,
        }
    }
}

/// Content with its eager-loaded relations, as handed to the caller and as
/// serialized through the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDto {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub body: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub status: ContentStatus,
    pub author: AuthorDto,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub meta: ContentMeta,
    pub categories: Vec<CategoryDto>,
    pub tags: Vec<TagDto>,
    pub media: Vec<MediaDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ContentWithRelations> for ContentDto {
    fn from(loaded: ContentWithRelations) -> Self {
        let ContentWithRelations {
            content,
            author,
            categories,
            tags,
            media,
        } = loaded;
        Self {
            id: content.id.into(),
            title: content.title.into(),
            slug: content.slug.into(),
            body: content.body.into(),
            excerpt: content.excerpt,
            content_type: content.content_type,
            status: content.status,
            author: author.into(),
            published_at: content.published_at,
            featured_image: content.featured_image,
            meta: content.meta,
            categories: categories.into_iter().map(Into::into).collect(),
            tags: tags.into_iter().map(Into::into).collect(),
            media: media.into_iter().map(Into::into).collect(),
            created_at: content.created_at,
            updated_at: content.updated_at,
        }
    }
}
