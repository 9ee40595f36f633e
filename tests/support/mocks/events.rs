// tests/support/mocks/events.rs
use kiji_core::application::ports::events::EventPublisher;
use kiji_core::domain::content::events::ContentEvent;
use std::sync::Mutex;

/// Records every published event so tests can assert on the stream.
#[derive(Default)]
pub struct CapturingEventPublisher {
    events: Mutex<Vec<ContentEvent>>,
}

impl CapturingEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ContentEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventPublisher for CapturingEventPublisher {
    fn publish(&self, event: ContentEvent) {
        self.events.lock().unwrap().push(event);
    }
}
