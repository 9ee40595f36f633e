use crate::domain::content::repository::Page;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: serde::de::DeserializeOwned"
))]
pub struct PageDto<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub per_page: u32,
    pub current_page: u32,
    pub last_page: u32,
}

impl<T> PageDto<T> {
    pub fn from_page<S>(page: Page<S>) -> Self
    where
        T: From<S>,
    {
        let last_page = page.last_page();
        Self {
            items: page.items.into_iter().map(Into::into).collect(),
            total: page.total,
            per_page: page.per_page,
            current_page: page.current_page,
            last_page,
        }
    }
}
