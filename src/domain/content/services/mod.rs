// src/domain/content/services/mod.rs
use std::sync::Arc;

use crate::application::ports::util::SlugGenerator;
use crate::domain::content::repository::ContentReadRepository;
use crate::domain::content::value_objects::{ContentId, ContentSlug, ContentTitle};
use crate::domain::errors::DomainResult;
use chrono::Utc;

/// Domain service responsible for producing unique slugs for contents.
///
/// Check-then-insert is not atomic against concurrent writers; the storage
/// layer carries a unique index on live slugs and the create path retries on
/// the resulting conflict.
pub struct ContentSlugService {
    read_repo: Arc<dyn ContentReadRepository>,
    generator: Arc<dyn SlugGenerator>,
}

impl ContentSlugService {
    pub fn new(
        read_repo: Arc<dyn ContentReadRepository>,
        generator: Arc<dyn SlugGenerator>,
    ) -> Self {
        Self {
            read_repo,
            generator,
        }
    }

    /// Derive a URL-safe slug from the title, appending `-1`, `-2`, ... until
    /// no live content holds the candidate. `ignore_id` lets an update keep
    /// its own slug.
    pub async fn generate_unique_slug(
        &self,
        title: &ContentTitle,
        ignore_id: Option<ContentId>,
    ) -> DomainResult<ContentSlug> {
        let base = self.generator.slugify(title.as_str());
        let base_slug = if base.is_empty() {
            format!("content-{}", Utc::now().timestamp())
        } else {
            base
        };

        let mut candidate = base_slug.clone();
        let mut counter = 1u64;

        loop {
            let slug = ContentSlug::new(candidate.clone())?;
            match self.read_repo.find_by_slug(&slug).await? {
                Some(existing) if ignore_id.is_some_and(|id| id == existing.id) => {
                    return Ok(slug);
                }
                Some(_) => {
                    candidate = format!("{base_slug}-{counter}");
                    counter += 1;
                }
                None => return Ok(slug),
            }
        }
    }
}
