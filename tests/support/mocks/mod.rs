// tests/support/mocks/mod.rs
#![allow(dead_code)]

pub mod cache;
pub mod events;
pub mod repos;
pub mod time;

pub use cache::InMemoryContentCache;
pub use events::CapturingEventPublisher;
pub use repos::InMemoryContentRepository;
pub use storage::RecordingFileStore;
pub use time::FixedClock;
