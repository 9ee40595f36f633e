// src/application/commands/contents/mod.rs
mod create;
mod delete;
mod service;
mod status;
mod update;

pub use create::{CreateContentCommand, CreateContentCommandBuilder};
pub use service::ContentCommandService;
pub use update::UpdateContentCommand;
