// src/infrastructure/events.rs
use crate::application::ports::events::EventPublisher;
use crate::domain::content::events::ContentEvent;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

const DEFAULT_CAPACITY: usize = 256;

/// Broadcast-channel event bus. `publish` never blocks and never fails the
/// caller; consumers subscribe and run on their own tasks, so a slow or
/// crashing listener cannot reach back into the triggering operation.
pub struct BroadcastEventBus {
    sender: broadcast::Sender<ContentEvent>,
}

impl BroadcastEventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ContentEvent> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for BroadcastEventBus {
    fn publish(&self, event: ContentEvent) {
        // No subscribers is fine; the event is simply dropped.
        if let Err(err) = self.sender.send(event) {
            tracing::debug!(error = %err, "content event had no listeners");
        }
    }
}

/// Default listener: observes the event stream and logs it, standing in for
/// the notification consumer that would fan these out.
pub fn spawn_event_logger(bus: &BroadcastEventBus) -> JoinHandle<()> {
    let mut receiver = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(ContentEvent::Created { id, author_id, at }) => {
                    tracing::info!(
                        content_id = i64::from(id),
                        author_id = i64::from(author_id),
                        %at,
                        "content created event"
                    );
                }
                Ok(ContentEvent::Published { content, at }) => {
                    tracing::info!(
                        content_id = i64::from(content.id),
                        slug = %content.slug,
                        %at,
                        "content published event"
                    );
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event logger lagged behind");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
