//! In-memory store implementation using moka

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use serde_json::Value;

use crate::domain::cache::{KvStore, PutOptions};
use crate::domain::DomainError;

/// Configuration for the in-memory store
#[derive(Debug, Clone)]
pub struct InMemoryStoreConfig {
    /// Maximum number of entries
    pub max_capacity: u64,
    /// Entries not accessed for this duration are evicted
    pub time_to_idle: Option<Duration>,
}

impl Default for InMemoryStoreConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            time_to_idle: None,
        }
    }
}

impl InMemoryStoreConfig {
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }

    pub fn with_time_to_idle(mut self, tti: Duration) -> Self {
        self.time_to_idle = Some(tti);
        self
    }
}

/// Entry stored in moka
#[derive(Debug, Clone)]
struct StoredEntry {
    data: String,
    /// Seconds since epoch; `None` never expires
    expires_at: Option<u64>,
    metadata: Option<Value>,
}

/// Thread-safe in-memory store
///
/// Honours `expiration` and `expirationTtl` per entry and keeps metadata.
/// Other put options are accepted and ignored.
#[derive(Debug)]
pub struct InMemoryStore {
    cache: MokaCache<String, StoredEntry>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_config(InMemoryStoreConfig::default())
    }

    pub fn with_config(config: InMemoryStoreConfig) -> Self {
        let mut builder = MokaCache::builder().max_capacity(config.max_capacity);

        if let Some(tti) = config.time_to_idle {
            builder = builder.time_to_idle(tti);
        }

        Self {
            cache: builder.build(),
        }
    }

    fn current_time_secs() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    fn is_expired(entry: &StoredEntry) -> bool {
        entry
            .expires_at
            .is_some_and(|expires_at| Self::current_time_secs() >= expires_at)
    }

    async fn live_entry(&self, key: &str) -> Option<StoredEntry> {
        let entry = self.cache.get(key).await?;

        if Self::is_expired(&entry) {
            self.cache.remove(key).await;
            return None;
        }

        Some(entry)
    }

    /// Metadata written with the entry under `key`
    pub async fn metadata(&self, key: &str) -> Option<Value> {
        self.live_entry(key).await.and_then(|entry| entry.metadata)
    }

    /// Absolute expiry of the entry under `key`, in seconds since epoch
    pub async fn expires_at(&self, key: &str) -> Option<u64> {
        self.live_entry(key).await.and_then(|entry| entry.expires_at)
    }

    /// Approximate number of entries
    pub async fn len(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KvStore for InMemoryStore {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.live_entry(key).await.map(|entry| entry.data))
    }

    async fn put(&self, key: &str, value: &str, options: &PutOptions) -> Result<(), DomainError> {
        let entry = StoredEntry {
            data: value.to_string(),
            expires_at: options.expires_at(Self::current_time_secs())?,
            metadata: options.metadata.clone(),
        };

        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }
}
