pub mod cache;
pub mod database;
pub mod events;
pub mod repositories;
pub mod storage;
pub mod time;
pub mod util;
