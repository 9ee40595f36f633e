// src/domain/media.rs
use crate::domain::content::value_objects::ContentId;
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MediaId(pub i64);

impl MediaId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation("media id must be positive".into()))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<MediaId> for i64 {
    fn from(value: MediaId) -> Self {
        value.0
    }
}

/// One uploaded asset owned by a content row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub id: MediaId,
    pub content_id: ContentId,
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    pub path: String,
    pub alt_text: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a media row; the backing file has already been stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedia {
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    pub path: String,
    pub alt_text: Option<String>,
}

/// Broad asset classification used for validation and storage layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Document,
}

impl MediaKind {
    /// Classify by MIME type; unsupported types are a validation failure.
    pub fn from_mime(mime: &str) -> DomainResult<Self> {
        if mime.starts_with("image/") {
            return Ok(Self::Image);
        }
        if mime.starts_with("video/") {
            return Ok(Self::Video);
        }
        if mime.starts_with("audio/") {
            return Ok(Self::Audio);
        }
        if ["pdf", "msword", "officedocument", "excel", "powerpoint"]
            .iter()
            .any(|marker| mime.contains(marker))
        {
            return Ok(Self::Document);
        }
        Err(DomainError::Validation(format!(
            "unsupported media type: {mime}"
        )))
    }

    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            Self::Image => &["jpg", "jpeg", "png", "gif", "webp"],
            Self::Video => &["mp4", "mov", "avi", "webm"],
            Self::Audio => &["mp3", "wav", "ogg"],
            Self::Document => &["pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx"],
        }
    }

    pub fn allows_extension(self, ext: &str) -> bool {
        let ext = ext.to_ascii_lowercase();
        self.allowed_extensions().contains(&ext.as_str())
    }

    pub fn max_size_bytes(self) -> u64 {
        match self {
            Self::Image => 5 * 1024 * 1024,
            Self::Video => 100 * 1024 * 1024,
            Self::Audio => 20 * 1024 * 1024,
            Self::Document => 10 * 1024 * 1024,
        }
    }

    pub fn folder(self) -> &'static str {
        match self {
            Self::Image => "contents/images",
            Self::Video => "contents/videos",
            Self::Audio => "contents/audio",
            Self::Document => "contents/documents",
        }
    }
}
