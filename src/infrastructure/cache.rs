// src/infrastructure/cache.rs
use crate::application::ApplicationResult;
use crate::application::error::ApplicationError;
use crate::application::ports::cache::ContentCache;
use async_trait::async_trait;
use deadpool_redis::{Config as DeadpoolConfig, Connection, Pool, Runtime};
use redis::AsyncCommands;

const ENTITY_PREFIX: &str = "content:";
const LIST_PREFIX: &str = "content_list:";
// Set of live list keys, kept so coarse invalidation can drop the whole
// namespace without a keyspace scan.
const LIST_INDEX_KEY: &str = "content_list:keys";

/// Redis-backed cache gateway for content entities and list pages.
#[derive(Clone)]
pub struct RedisContentCache {
    pool: Pool,
    ttl_secs: u64,
}

impl RedisContentCache {
    /// Create a Redis backed content cache from a redis URL
    /// (e.g. redis://:password@host:6379/0).
    pub fn from_url(url: &str, ttl_secs: u64) -> Result<Self, ApplicationError> {
        let cfg = DeadpoolConfig::from_url(url);
        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        Ok(Self { pool, ttl_secs })
    }

    async fn conn(&self) -> ApplicationResult<Connection> {
        self.pool
            .get()
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))
    }
}

#[async_trait]
impl ContentCache for RedisContentCache {
    async fn get_entity(&self, key: &str) -> ApplicationResult<Option<String>> {
        let mut conn = self.conn().await?;
        let payload: Option<String> = conn
            .get(format!("{ENTITY_PREFIX}{key}"))
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(payload)
    }

    async fn put_entity(&self, key: &str, payload: String) -> ApplicationResult<()> {
        let mut conn = self.conn().await?;
        conn.set_ex::<_, _, ()>(format!("{ENTITY_PREFIX}{key}"), payload, self.ttl_secs)
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(())
    }

    async fn invalidate_entity(&self, key: &str) -> ApplicationResult<()> {
        let mut conn = self.conn().await?;
        conn.del::<_, ()>(format!("{ENTITY_PREFIX}{key}"))
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(())
    }

    async fn get_list(&self, key: &str) -> ApplicationResult<Option<String>> {
        let mut conn = self.conn().await?;
        let payload: Option<String> = conn
            .get(format!("{LIST_PREFIX}{key}"))
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(payload)
    }

    async fn put_list(&self, key: &str, payload: String) -> ApplicationResult<()> {
        let mut conn = self.conn().await?;
        let full_key = format!("{LIST_PREFIX}{key}");
        redis::pipe()
            .set_ex(&full_key, payload, self.ttl_secs)
            .ignore()
            .sadd(LIST_INDEX_KEY, &full_key)
            .ignore()
            .query_async::<()>(&mut conn)
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(())
    }

    async fn invalidate_lists(&self) -> ApplicationResult<()> {
        let mut conn = self.conn().await?;
        let keys: Vec<String> = conn
            .smembers(LIST_INDEX_KEY)
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        let mut pipe = redis::pipe();
        for key in &keys {
            pipe.del(key).ignore();
        }
        pipe.del(LIST_INDEX_KEY).ignore();
        pipe.query_async::<()>(&mut conn)
            .await
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

        tracing::debug!(entries = keys.len(), "flushed content list cache");
        Ok(())
    }
}
