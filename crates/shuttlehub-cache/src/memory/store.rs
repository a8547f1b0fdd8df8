//! In-memory cache implementation using the moka crate.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;

use shuttlehub_core::config::cache::MemoryCacheConfig;
use shuttlehub_core::result::AppResult;
use shuttlehub_core::traits::cache::CacheProvider;

/// In-memory cache provider using moka.
///
/// moka enforces one cache-level TTL; per-call TTLs finer than the
/// configured `time_to_live_seconds` are honored by the Redis provider only.
#[derive(Clone)]
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: Cache<String, String>,
    /// Default TTL for entries (informational; moka applies the cache TTL).
    default_ttl: Duration,
}

impl std::fmt::Debug for MemoryCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCacheProvider")
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig, default_ttl_seconds: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.time_to_live_seconds))
            .build();

        Self {
            cache,
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await)
    }

    async fn set(&self, key: &str, value: &str, _ttl: Duration) -> AppResult<()> {
        self.cache.insert(key.to_string(), value.to_string()).await;
        Ok(())
    }

    async fn set_default(&self, key: &str, value: &str) -> AppResult<()> {
        self.set(key, value, self.default_ttl).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.remove(key).await;
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn flush_all(&self) -> AppResult<()> {
        self.cache.invalidate_all();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> MemoryCacheProvider {
        MemoryCacheProvider::new(&MemoryCacheConfig::default(), 300)
    }

    #[tokio::test]
    async fn test_set_get_delete() {
        let cache = provider();
        cache
            .set("k", "v", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some("v".to_string()));

        cache.delete("k").await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_miss_returns_none() {
        let cache = provider();
        assert_eq!(cache.get("absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_json_round_trip() {
        let cache = provider();
        let value = serde_json::json!({ "available_seats": 3 });
        cache
            .set_json("shuttle", &value, Duration::from_secs(60))
            .await
            .unwrap();
        let loaded: Option<serde_json::Value> = cache.get_json("shuttle").await.unwrap();
        assert_eq!(loaded, Some(value));
    }

    #[tokio::test]
    async fn test_flush_all() {
        let cache = provider();
        cache.set_default("a", "1").await.unwrap();
        cache.set_default("b", "2").await.unwrap();
        cache.flush_all().await.unwrap();
        assert_eq!(cache.get("a").await.unwrap(), None);
        assert_eq!(cache.get("b").await.unwrap(), None);
    }
}
