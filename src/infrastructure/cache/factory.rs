//! Store factory for runtime selection

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::cache::KvStore;
use crate::domain::DomainError;

use super::in_memory::{InMemoryStore, InMemoryStoreConfig};
use super::redis::{RedisStore, RedisStoreConfig};

/// Supported store types
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreType {
    /// In-memory store using moka
    #[default]
    InMemory,
    /// Redis store
    Redis,
}

impl std::fmt::Display for StoreType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreType::InMemory => write!(f, "in_memory"),
            StoreType::Redis => write!(f, "redis"),
        }
    }
}

/// Configuration for the store factory
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Type of store to create
    #[serde(rename = "type")]
    pub store_type: StoreType,
    /// Redis URL (required for Redis type)
    pub redis_url: Option<String>,
    /// Key prefix for namespacing (Redis only)
    pub key_prefix: Option<String>,
    /// Maximum capacity (in-memory only)
    pub max_capacity: u64,
    /// Evict entries idle for this many seconds (in-memory only)
    pub time_to_idle_secs: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_type: StoreType::InMemory,
            redis_url: None,
            key_prefix: None,
            max_capacity: 10_000,
            time_to_idle_secs: None,
        }
    }
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            store_type: StoreType::Redis,
            redis_url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }

    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }

    pub fn with_time_to_idle_secs(mut self, secs: u64) -> Self {
        self.time_to_idle_secs = Some(secs);
        self
    }

    /// Whether entries outlive the process
    pub fn is_persistent(&self) -> bool {
        self.store_type != StoreType::InMemory
    }
}

/// Factory for creating store instances
#[derive(Debug, Default)]
pub struct StoreFactory;

impl StoreFactory {
    pub fn new() -> Self {
        Self
    }

    /// Creates a store instance based on configuration
    pub async fn create(&self, config: &StoreConfig) -> Result<Arc<dyn KvStore>, DomainError> {
        tracing::debug!(store_type = %config.store_type, "Creating store");

        match config.store_type {
            StoreType::InMemory => {
                let mut in_memory_config =
                    InMemoryStoreConfig::default().with_max_capacity(config.max_capacity);

                if let Some(secs) = config.time_to_idle_secs {
                    in_memory_config =
                        in_memory_config.with_time_to_idle(Duration::from_secs(secs));
                }

                Ok(Arc::new(InMemoryStore::with_config(in_memory_config)))
            }
            StoreType::Redis => {
                let url = config.redis_url.clone().ok_or_else(|| {
                    DomainError::configuration("Redis URL is required for Redis store type")
                })?;

                let mut redis_config = RedisStoreConfig::new(url);

                if let Some(prefix) = &config.key_prefix {
                    redis_config = redis_config.with_key_prefix(prefix.clone());
                }

                Ok(Arc::new(RedisStore::new(redis_config).await?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::{KvStoreExt, PutOptions};

    #[test]
    fn test_store_type_display() {
        assert_eq!(StoreType::InMemory.to_string(), "in_memory");
        assert_eq!(StoreType::Redis.to_string(), "redis");
    }

    #[test]
    fn test_store_config_redis() {
        let config = StoreConfig::redis("redis://localhost:6379").with_key_prefix("myapp");

        assert_eq!(config.store_type, StoreType::Redis);
        assert_eq!(config.redis_url, Some("redis://localhost:6379".to_string()));
        assert_eq!(config.key_prefix, Some("myapp".to_string()));
    }

    #[test]
    fn test_store_config_deserialize() {
        let config: StoreConfig = serde_json::from_value(serde_json::json!({
            "type": "redis",
            "redis_url": "redis://cache:6379"
        }))
        .unwrap();

        assert_eq!(config.store_type, StoreType::Redis);
        assert_eq!(config.max_capacity, 10_000);
        assert_eq!(config.time_to_idle_secs, None);
        assert!(config.is_persistent());
    }

    #[test]
    fn test_in_memory_is_not_persistent() {
        assert!(!StoreConfig::in_memory().is_persistent());
    }

    #[tokio::test]
    async fn test_factory_create_in_memory_with_idle_eviction() {
        let config = StoreConfig::in_memory().with_time_to_idle_secs(300);
        let store = StoreFactory::new().create(&config).await.unwrap();

        store
            .put_json("idle", &1u32, &PutOptions::new())
            .await
            .unwrap();

        let result: Option<u32> = store.get_json("idle").await.unwrap();
        assert_eq!(result, Some(1));
    }

    #[tokio::test]
    async fn test_factory_create_in_memory() {
        let store = StoreFactory::new()
            .create(&StoreConfig::in_memory().with_max_capacity(10))
            .await
            .unwrap();

        store
            .put_json("test", &"value", &PutOptions::new())
            .await
            .unwrap();

        let result: Option<String> = store.get_json("test").await.unwrap();
        assert_eq!(result, Some("value".to_string()));
    }

    #[tokio::test]
    async fn test_factory_create_redis_missing_url() {
        let config = StoreConfig {
            store_type: StoreType::Redis,
            redis_url: None,
            ..Default::default()
        };

        let result = StoreFactory::new().create(&config).await;
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }
}
