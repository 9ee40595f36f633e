// src/application/ports/mod.rs
pub mod cache;
pub mod events;
pub mod storage;
pub mod time;
pub mod util;
