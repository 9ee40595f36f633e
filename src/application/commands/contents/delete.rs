// src/application/commands/contents/delete.rs
use super::ContentCommandService;
use crate::{
    application::error::ApplicationResult,
    domain::content::value_objects::ContentId,
};

impl ContentCommandService {
    /// Soft delete. A missing id is reported as `false`, not an error; the
    /// row (and its media rows/files) stay in place, merely invisible to
    /// normal queries.
    pub async fn delete_content(&self, id: i64) -> ApplicationResult<bool> {
        let id = ContentId::new(id)?;
        let Some(current) = self.read_repo.find_by_id(id).await? else {
            return Ok(false);
        };

        let now = self.clock.now();
        if !self.write_repo.soft_delete(id, now).await? {
            // Another caller won the race; nothing to invalidate.
            return Ok(false);
        }

        tracing::info!(content_id = i64::from(id), slug = %current.slug, "content deleted");
        self.invalidate_after_mutation(id, Some(&current.slug))
            .await?;
        Ok(true)
    }
}
