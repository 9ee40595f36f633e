// src/application/queries/contents/mod.rs
mod browse;
mod get;
mod list;
mod service;

pub use service::ContentQueryService;
