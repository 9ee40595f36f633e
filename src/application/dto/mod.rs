pub mod contents;
pub mod pagination;

pub use contents::{AuthorDto, CategoryDto, ContentDto, MediaDto, TagDto};
pub use pagination::PageDto;
