// src/application/ports/events.rs
use crate::domain::content::events::ContentEvent;

/// Fire-and-forget event sink. `publish` must not block and must not fail the
/// caller; services invoke it only after their write has committed.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: ContentEvent);
}
