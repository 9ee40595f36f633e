pub mod entity;
pub mod events;
pub mod filter;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use entity::{Content, ContentUpdate, ContentWithRelations, NewContent, StatusUpdate};
pub use filter::{ContentFilter, SortDirection, SortField};
pub use repository::{ContentReadRepository, ContentWriteRepository, Page, UpdateOutcome};
pub use value_objects::{
    ContentBody, ContentId, ContentMeta, ContentSlug, ContentStatus, ContentTitle, ContentType,
};
