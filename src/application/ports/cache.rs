// src/application/ports/cache.rs
use crate::application::error::ApplicationResult;
use async_trait::async_trait;

/// Tagged cache gateway over serialized content snapshots.
///
/// Entries are opaque payloads: writers invalidate rather than patch, so a
/// stale partial update can never survive in the cache. Entity keys are
/// `id:{id}` / `slug:{slug}`; list keys come from
/// `ContentFilter::cache_key`. List invalidation is deliberately coarse: the
/// whole namespace goes at once, because any mutation may change the
/// membership of any filtered listing.
pub fn entity_id_key(id: i64) -> String {
    format!("id:{id}")
}

pub fn entity_slug_key(slug: &str) -> String {
    format!("slug:{slug}")
}

#[async_trait]
pub trait ContentCache: Send + Sync {
    async fn get_entity(&self, key: &str) -> ApplicationResult<Option<String>>;
    async fn put_entity(&self, key: &str, payload: String) -> ApplicationResult<()>;
    async fn invalidate_entity(&self, key: &str) -> ApplicationResult<()>;

    async fn get_list(&self, key: &str) -> ApplicationResult<Option<String>>;
    async fn put_list(&self, key: &str, payload: String) -> ApplicationResult<()>;
    /// Drop every cached list entry.
    async fn invalidate_lists(&self) -> ApplicationResult<()>;
}
