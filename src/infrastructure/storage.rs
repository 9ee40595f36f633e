// src/infrastructure/storage.rs
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::ports::storage::{FileStore, UploadedFile};
use crate::domain::media::MediaKind;
use async_trait::async_trait;
use slug::slugify;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Filesystem-backed file store. Layout under `root` follows the media kind
/// (`contents/images`, `contents/videos`, ...); stored names are slugified
/// originals with a uuid suffix so concurrent uploads never collide.
pub struct LocalFileStore {
    root: PathBuf,
    base_url: String,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }

    fn validate(file: &UploadedFile, kind: MediaKind) -> ApplicationResult<String> {
        let ext = file.extension().ok_or_else(|| {
            ApplicationError::validation(format!(
                "file {:?} has no extension",
                file.original_name
            ))
        })?;
        if !kind.allows_extension(&ext) {
            return Err(ApplicationError::validation(format!(
                "invalid file extension {:?}, allowed: {}",
                ext,
                kind.allowed_extensions().join(", ")
            )));
        }
        if file.size() > kind.max_size_bytes() {
            return Err(ApplicationError::validation(format!(
                "file size exceeds maximum of {} bytes",
                kind.max_size_bytes()
            )));
        }
        Ok(ext)
    }

    fn unique_filename(file: &UploadedFile, ext: &str) -> String {
        let stem = file
            .original_name
            .rsplit_once('.')
            .map_or(file.original_name.as_str(), |(stem, _)| stem);
        let stem = slugify(stem);
        let stem = if stem.is_empty() { "file".into() } else { stem };
        format!("{stem}-{}.{ext}", Uuid::new_v4().simple())
    }

    fn guard_relative(path: &str) -> ApplicationResult<&Path> {
        let candidate = Path::new(path);
        if candidate.is_absolute()
            || candidate
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(ApplicationError::validation(format!(
                "refusing non-relative storage path {path:?}"
            )));
        }
        Ok(candidate)
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn store(&self, file: &UploadedFile) -> ApplicationResult<String> {
        let kind = MediaKind::from_mime(&file.mime_type)?;
        let ext = Self::validate(file, kind)?;

        let relative = format!("{}/{}", kind.folder(), Self::unique_filename(file, &ext));
        let target = self.root.join(&relative);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        }
        tokio::fs::write(&target, &file.data)
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        tracing::debug!(path = %relative, size = file.size(), "stored upload");
        Ok(relative)
    }

    async fn delete(&self, path: &str) -> ApplicationResult<()> {
        let relative = Self::guard_relative(path)?;
        match tokio::fs::remove_file(self.root.join(relative)).await {
            Ok(()) => Ok(()),
            // Deleting twice (compensation paths) must stay quiet.
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ApplicationError::infrastructure(err.to_string())),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}
