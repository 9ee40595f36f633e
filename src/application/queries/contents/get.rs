// src/application/queries/contents/get.rs
use super::ContentQueryService;
use crate::{
    application::{
        dto::ContentDto,
        error::ApplicationResult,
        ports::cache::{entity_id_key, entity_slug_key},
    },
    domain::content::value_objects::{ContentId, ContentSlug},
};

impl ContentQueryService {
    /// Cache-aside lookup by id. A not-found result is never cached; every
    /// miss re-queries persistence.
    pub async fn find_content_by_id(&self, id: i64) -> ApplicationResult<Option<ContentDto>> {
        let id = ContentId::new(id)?;
        let key = entity_id_key(i64::from(id));

        if let Some(payload) = self.cache.get_entity(&key).await?
            && let Some(dto) = Self::decode_cached::<ContentDto>(&key, &payload)
        {
            return Ok(Some(dto));
        }

        let Some(loaded) = self.read_repo.find_by_id_with_relations(id).await? else {
            return Ok(None);
        };
        let dto = ContentDto::from(loaded);
        self.cache
            .put_entity(&key, Self::encode_for_cache(&dto)?)
            .await?;
        Ok(Some(dto))
    }

    /// Cache-aside lookup by slug, keyed independently of the id entry.
    pub async fn find_content_by_slug(&self, slug: &str) -> ApplicationResult<Option<ContentDto>> {
        let slug = ContentSlug::new(slug)?;
        let key = entity_slug_key(slug.as_str());

        if let Some(payload) = self.cache.get_entity(&key).await?
            && let Some(dto) = Self::decode_cached::<ContentDto>(&key, &payload)
        {
            return Ok(Some(dto));
        }

        let Some(loaded) = self.read_repo.find_by_slug_with_relations(&slug).await? else {
            return Ok(None);
        };
        let dto = ContentDto::from(loaded);
        self.cache
            .put_entity(&key, Self::encode_for_cache(&dto)?)
            .await?;
        Ok(Some(dto))
    }
}
