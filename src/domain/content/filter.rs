// src/domain/content/filter.rs
use crate::domain::content::value_objects::{ContentStatus, ContentType};
use crate::domain::taxonomy::{CategoryId, TagId};
use crate::domain::user::UserId;
use std::fmt::Write as _;

pub const DEFAULT_PER_PAGE: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    PublishedAt,
    CreatedAt,
    Title,
}

impl SortField {
    pub fn column(self) -> &'static str {
        match self {
            Self::PublishedAt => "published_at",
            Self::CreatedAt => "created_at",
            Self::Title => "title",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Query specification for filtered content listings. Bounds on `per_page`
/// (1..=100) are enforced by the validation layer upstream; the repository
/// trusts the value.
#[derive(Debug, Clone)]
pub struct ContentFilter {
    pub category_id: Option<CategoryId>,
    pub tag_id: Option<TagId>,
    pub author_id: Option<UserId>,
    pub content_type: Option<ContentType>,
    pub status: Option<ContentStatus>,
    pub search: Option<String>,
    pub per_page: u32,
    pub page: u32,
    pub sort_by: SortField,
    pub sort_direction: SortDirection,
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self {
            category_id: None,
            tag_id: None,
            author_id: None,
            content_type: None,
            status: None,
            search: None,
            per_page: DEFAULT_PER_PAGE,
            page: 1,
            sort_by: SortField::PublishedAt,
            sort_direction: SortDirection::Desc,
        }
    }
}

impl ContentFilter {
    /// Search term with surrounding whitespace stripped; blank terms count as
    /// no search at all.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page.max(1) - 1) * i64::from(self.per_page)
    }

    /// Deterministic cache key over the normalized field set. Page and page
    /// size participate so distinct pages never share an entry.
    pub fn cache_key(&self) -> String {
        let mut canonical = String::new();
        let _ = write!(
            canonical,
            "category={};tag={};author={};type={};status={};search={};sort={}:{};per_page={};page={}",
            self.category_id.map(i64::from).unwrap_or_default(),
            self.tag_id.map(i64::from).unwrap_or_default(),
            self.author_id.map(i64::from).unwrap_or_default(),
            self.content_type.map(ContentType::as_str).unwrap_or(""),
            self.status.map(ContentStatus::as_str).unwrap_or(""),
            self.search_term().unwrap_or(""),
            self.sort_by.column(),
            self.sort_direction.keyword(),
            self.per_page,
            self.page.max(1),
        );
        format!("contents:{}", blake3::hash(canonical.as_bytes()).to_hex())
    }
}
