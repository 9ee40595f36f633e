// src/application/ports/storage.rs
use crate::application::error::ApplicationResult;
use async_trait::async_trait;
use bytes::Bytes;

/// An uploaded binary received from the transport layer.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub original_name: String,
    pub mime_type: String,
    pub data: Bytes,
    pub alt_text: Option<String>,
}

impl UploadedFile {
    pub fn new(
        original_name: impl Into<String>,
        mime_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            original_name: original_name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
            alt_text: None,
        }
    }

    pub fn with_alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = Some(alt_text.into());
        self
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Lowercased extension of the client-supplied name, if any.
    pub fn extension(&self) -> Option<String> {
        self.original_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

/// File store boundary. Storage is outside the database transaction, so
/// callers compensate with `delete` when a surrounding write fails.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Validate and persist the upload, returning its stable relative path.
    async fn store(&self, file: &UploadedFile) -> ApplicationResult<String>;
    /// Remove a stored file. Deleting an already-missing path is not an error.
    async fn delete(&self, path: &str) -> ApplicationResult<()>;
    /// Public URL for a stored path.
    fn url(&self, path: &str) -> String;
}
