// tests/support/mocks/cache.rs
use async_trait::async_trait;
use kiji_core::application::error::ApplicationResult;
use kiji_core::application::ports::cache::ContentCache;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory stand-in for the Redis gateway. Entries never expire; tests
/// observe hits and stored keys directly.
#[derive(Default)]
pub struct InMemoryContentCache {
    entities: Mutex<HashMap<String, String>>,
    lists: Mutex<HashMap<String, String>>,
}

impl InMemoryContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.lock().unwrap().len()
    }

    pub fn list_count(&self) -> usize {
        self.lists.lock().unwrap().len()
    }

    pub fn has_entity(&self, key: &str) -> bool {
        self.entities.lock().unwrap().contains_key(key)
    }

    pub fn has_list(&self, key: &str) -> bool {
        self.lists.lock().unwrap().contains_key(key)
    }

    /// Overwrite an entry with garbage so decode-failure paths can be tested.
    pub fn corrupt_entity(&self, key: &str) {
        self.entities
            .lock()
            .unwrap()
            .insert(key.to_owned(), "{not json".to_owned());
    }
}

#[async_trait]
impl ContentCache for InMemoryContentCache {
    async fn get_entity(&self, key: &str) -> ApplicationResult<Option<String>> {
        Ok(self.entities.lock().unwrap().get(key).cloned())
    }

    async fn put_entity(&self, key: &str, payload: String) -> ApplicationResult<()> {
        self.entities.lock().unwrap().insert(key.to_owned(), payload);
        Ok(())
    }

    async fn invalidate_entity(&self, key: &str) -> ApplicationResult<()> {
        self.entities.lock().unwrap().remove(key);
        Ok(())
    }

    async fn get_list(&self, key: &str) -> ApplicationResult<Option<String>> {
        Ok(self.lists.lock().unwrap().get(key).cloned())
    }

    async fn put_list(&self, key: &str, payload: String) -> ApplicationResult<()> {
        self.lists.lock().unwrap().insert(key.to_owned(), payload);
        Ok(())
    }

    async fn invalidate_lists(&self) -> ApplicationResult<()> {
        self.lists.lock().unwrap().clear();
        Ok(())
    }
}
