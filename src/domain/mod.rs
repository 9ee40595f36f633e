pub mod content;
pub mod errors;
pub mod media;
pub mod taxonomy;
pub mod user;
