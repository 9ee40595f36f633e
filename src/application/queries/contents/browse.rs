// src/application/queries/contents/browse.rs
//
// Category/tag browse endpoints: deliberately simple pass-throughs with no
// caching layer.
use super::ContentQueryService;
use crate::{
    application::{
        dto::{ContentDto, PageDto},
        error::ApplicationResult,
    },
    domain::taxonomy::{CategoryId, TagId},
};

impl ContentQueryService {
    pub async fn get_contents_by_category_id(
        &self,
        category_id: i64,
        per_page: u32,
        page: u32,
    ) -> ApplicationResult<PageDto<ContentDto>> {
        let category_id = CategoryId::new(category_id)?;
        let result = self
            .read_repo
            .get_paginated_by_category_id(category_id, per_page, page)
            .await?;
        Ok(PageDto::from_page(result))
    }

    pub async fn get_contents_by_category_slug(
        &self,
        category_slug: &str,
        per_page: u32,
        page: u32,
    ) -> ApplicationResult<PageDto<ContentDto>> {
        let result = self
            .read_repo
            .get_paginated_by_category_slug(category_slug, per_page, page)
            .await?;
        Ok(PageDto::from_page(result))
    }

    pub async fn get_contents_by_tag_id(
        &self,
        tag_id: i64,
        per_page: u32,
        page: u32,
    ) -> ApplicationResult<PageDto<ContentDto>> {
        let tag_id = TagId::new(tag_id)?;
        let result = self
            .read_repo
            .get_paginated_by_tag_id(tag_id, per_page, page)
            .await?;
        Ok(PageDto::from_page(result))
    }

    pub async fn get_contents_by_tag_slug(
        &self,
        tag_slug: &str,
        per_page: u32,
        page: u32,
    ) -> ApplicationResult<PageDto<ContentDto>> {
        let result = self
            .read_repo
            .get_paginated_by_tag_slug(tag_slug, per_page, page)
            .await?;
        Ok(PageDto::from_page(result))
    }
}
