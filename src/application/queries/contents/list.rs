// src/application/queries/contents/list.rs
use super::ContentQueryService;
use crate::{
    application::{
        dto::{ContentDto, PageDto},
        error::ApplicationResult,
    },
    domain::content::ContentFilter,
};

impl ContentQueryService {
    /// Filtered, sorted, paginated listing with cache-aside over the
    /// deterministic filter key. Mutations flush the whole list namespace, so
    /// a cached page can never outlive a content change.
    pub async fn get_contents(
        &self,
        filter: &ContentFilter,
    ) -> ApplicationResult<PageDto<ContentDto>> {
        let key = filter.cache_key();

        if let Some(payload) = self.cache.get_list(&key).await?
            && let Some(page) = Self::decode_cached::<PageDto<ContentDto>>(&key, &payload)
        {
            return Ok(page);
        }

        let page = self.read_repo.get_paginated(filter).await?;
        let dto = PageDto::<ContentDto>::from_page(page);
        self.cache
            .put_list(&key, Self::encode_for_cache(&dto)?)
            .await?;
        Ok(dto)
    }
}
