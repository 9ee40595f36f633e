// tests/support/mod.rs
#![allow(dead_code)]

pub mod mocks;

use kiji_core::application::ports::cache::ContentCache;
use kiji_core::application::ports::events::EventPublisher;
use kiji_core::application::ports::storage::FileStore;
use kiji_core::application::ports::time::Clock;
use kiji_core::application::ports::util::SlugGenerator;
use kiji_core::application::services::ApplicationServices;
use kiji_core::domain::content::{ContentReadRepository, ContentWriteRepository};
use kiji_core::infrastructure::util::DefaultSlugGenerator;
use mocks::{
    CapturingEventPublisher, FixedClock, InMemoryContentCache, InMemoryContentRepository,
    RecordingFileStore,
};
use once_cell::sync::Lazy;
use std::sync::Arc;

// Honors RUST_LOG so failing tests can be rerun with service tracing visible.
static TRACING: Lazy<()> = Lazy::new(|| {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
});

/// Fully wired application surface over in-memory ports, with handles to each
/// mock so tests can seed state and observe side effects.
pub struct TestHarness {
    pub services: ApplicationServices,
    pub repo: Arc<InMemoryContentRepository>,
    pub cache: Arc<InMemoryContentCache>,
    pub files: Arc<RecordingFileStore>,
    pub events: Arc<CapturingEventPublisher>,
    pub clock: Arc<FixedClock>,
}

/// Harness with author 1 ("alice") pre-seeded; everything else starts empty.
pub fn harness() -> TestHarness {
    Lazy::force(&TRACING);

    let repo = Arc::new(InMemoryContentRepository::new());
    repo.seed_author(1, "alice");

    let cache = Arc::new(InMemoryContentCache::new());
    let files = Arc::new(RecordingFileStore::new());
    let events = Arc::new(CapturingEventPublisher::new());
    let clock = Arc::new(FixedClock::new());

    let write_repo: Arc<dyn ContentWriteRepository> = repo.clone();
    let read_repo: Arc<dyn ContentReadRepository> = repo.clone();
    let cache_port: Arc<dyn ContentCache> = cache.clone();
    let file_port: Arc<dyn FileStore> = files.clone();
    let event_port: Arc<dyn EventPublisher> = events.clone();
    let clock_port: Arc<dyn Clock> = clock.clone();
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);

    let services = ApplicationServices::new(
        write_repo, read_repo, cache_port, file_port, event_port, clock_port, slugger,
    );

    TestHarness {
        services,
        repo,
        cache,
        files,
        events,
        clock,
    }
}
