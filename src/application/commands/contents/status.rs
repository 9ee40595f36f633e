// src/application/commands/contents/status.rs
use super::ContentCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::content::{
        Content,
        events::ContentEvent,
        value_objects::{ContentId, ContentStatus},
    },
};
use chrono::{DateTime, Utc};

impl ContentCommandService {
    /// Transition to PUBLISHED. Restamps `published_at` unconditionally
    /// (re-publishing refreshes the timestamp) and raises the published event
    /// once the row change is durable.
    pub async fn publish_content(&self, id: i64) -> ApplicationResult<()> {
        let (updated, now) = self.transition(id, ContentStatus::Published).await?;
        self.events.publish(ContentEvent::Published {
            content: Box::new(updated),
            at: now,
        });
        Ok(())
    }

    /// Transition to DRAFT. `published_at` keeps its last value.
    pub async fn draft_content(&self, id: i64) -> ApplicationResult<()> {
        self.transition(id, ContentStatus::Draft).await.map(|_| ())
    }

    /// Transition to ARCHIVED. Archived content can be drafted or published
    /// again; there is no terminal state.
    pub async fn archive_content(&self, id: i64) -> ApplicationResult<()> {
        self.transition(id, ContentStatus::Archived)
            .await
            .map(|_| ())
    }

    async fn transition(
        &self,
        id: i64,
        status: ContentStatus,
    ) -> ApplicationResult<(Content, DateTime<Utc>)> {
        let id = ContentId::new(id)?;
        self.read_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("content not found"))?;

        let now = self.clock.now();
        let published_at = match status {
            ContentStatus::Published => Some(now),
            ContentStatus::Draft | ContentStatus::Archived => None,
        };
        let updated = self
            .write_repo
            .set_status(id, status, published_at, now)
            .await?;

        tracing::info!(content_id = i64::from(id), status = %status, "content status changed");
        self.invalidate_after_mutation(updated.id, Some(&updated.slug))
            .await?;
        Ok((updated, now))
    }
}
