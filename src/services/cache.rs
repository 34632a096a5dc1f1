use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// Two-tier cache for assembled catalogs
///
/// L1 is an in-process moka cache and is always present. L2 is Redis, shared
/// across instances, and only used when a Redis URL is configured and reachable.
pub struct CacheManager {
    redis: Option<Arc<tokio::sync::Mutex<ConnectionManager>>>,
    l1_cache: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl CacheManager {
    /// In-memory cache only
    pub fn in_memory(l1_size: u64, ttl_secs: u64) -> Self {
        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            redis: None,
            l1_cache,
            ttl_secs,
        }
    }

    /// Connect L2 if `redis_url` is given; an unreachable Redis falls back to L1 only
    pub async fn new(redis_url: Option<&str>, l1_size: u64, ttl_secs: u64) -> Self {
        let mut cache = Self::in_memory(l1_size, ttl_secs);

        let Some(url) = redis_url else {
            return cache;
        };

        match Self::connect(url).await {
            Ok(conn) => {
                tracing::info!("Redis cache tier connected");
                cache.redis = Some(Arc::new(tokio::sync::Mutex::new(conn)));
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis ({}), using in-memory cache only", e);
            }
        }

        cache
    }

    async fn connect(url: &str) -> Result<ConnectionManager, CacheError> {
        let client = redis::Client::open(url)?;
        Ok(ConnectionManager::new(client).await?)
    }

    pub fn has_redis(&self) -> bool {
        self.redis.is_some()
    }

    /// Get a value from cache (L1 first, then L2)
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        if let Some(bytes) = self.l1_cache.get(key).await {
            tracing::trace!("L1 cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            let value: Option<String> = redis::cmd("GET")
                .arg(key)
                .query_async(&mut *conn)
                .await?;
            drop(conn);

            if let Some(json) = value {
                tracing::trace!("L2 cache hit: {}", key);

                // Populate L1 cache
                let bytes = json.as_bytes().to_vec();
                self.l1_cache.insert(key.to_string(), bytes).await;

                return Ok(serde_json::from_str(&json)?);
            }
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    /// Set a value in every available tier
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let json = serde_json::to_string(value)?;

        self.l1_cache
            .insert(key.to_string(), json.as_bytes().to_vec())
            .await;

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            let _: () = redis::cmd("SETEX")
                .arg(key)
                .arg(self.ttl_secs)
                .arg(json)
                .query_async(&mut *conn)
                .await?;
        }

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Delete a value from every tier
    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.l1_cache.invalidate(key).await;

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            let _: () = redis::cmd("DEL")
                .arg(key)
                .query_async(&mut *conn)
                .await?;
        }

        Ok(())
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// The assembled camp catalog
    pub fn catalog() -> String {
        "camps:catalog".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_set_get_delete() {
        let cache = CacheManager::in_memory(100, 60);
        assert!(!cache.has_redis());

        cache.set("key", &vec!["a".to_string(), "b".to_string()]).await.unwrap();
        let value: Vec<String> = cache.get("key").await.unwrap();
        assert_eq!(value, vec!["a", "b"]);

        cache.delete("key").await.unwrap();
        assert!(matches!(cache.get::<Vec<String>>("key").await, Err(CacheError::CacheMiss(_))));
    }

    #[tokio::test]
    async fn test_unreachable_redis_falls_back() {
        let cache = CacheManager::new(Some("not a redis url"), 100, 60).await;
        assert!(!cache.has_redis());
    }

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_redis_tier_set_get() {
        let cache = CacheManager::new(Some("redis://127.0.0.1:6379"), 100, 60).await;
        assert!(cache.has_redis());

        cache.set("test_key", &"test_value").await.unwrap();
        let result: String = cache.get("test_key").await.unwrap();
        assert_eq!(result, "test_value");

        cache.delete("test_key").await.unwrap();
        assert!(cache.get::<String>("test_key").await.is_err());
    }

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::catalog(), "camps:catalog");
    }
}
