// src/application/queries/contents/service.rs
use std::sync::Arc;

use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::cache::ContentCache,
};
use crate::domain::content::ContentReadRepository;
use serde::{Serialize, de::DeserializeOwned};

pub struct ContentQueryService {
    pub(super) read_repo: Arc<dyn ContentReadRepository>,
    pub(super) cache: Arc<dyn ContentCache>,
}

impl ContentQueryService {
    pub fn new(read_repo: Arc<dyn ContentReadRepository>, cache: Arc<dyn ContentCache>) -> Self {
        Self { read_repo, cache }
    }

    /// A payload that no longer decodes (e.g. after a DTO shape change) is
    /// treated as a miss, not an error.
    pub(super) fn decode_cached<T: DeserializeOwned>(key: &str, payload: &str) -> Option<T> {
        match serde_json::from_str(payload) {
            Ok(value) => {
                tracing::debug!(%key, "content cache hit");
                Some(value)
            }
            Err(err) => {
                tracing::warn!(%key, error = %err, "dropping undecodable cache entry");
                None
            }
        }
    }

    pub(super) fn encode_for_cache<T: Serialize>(value: &T) -> ApplicationResult<String> {
        serde_json::to_string(value).map_err(|err| {
            ApplicationError::infrastructure(format!("failed to serialize cache payload: {err}"))
        })
    }
}
