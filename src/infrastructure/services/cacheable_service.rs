//! Cache-aside coordinator

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use tracing::info;

use crate::domain::cache::{CommonOptions, Controller, KvStore, KvStoreExt, Producer, resolver};
use crate::domain::DomainError;

/// Cache-aside wrapper around a key-value store
///
/// Built once per store and common options, then shared across calls. Each
/// call runs get, produce, resolve and put strictly in that order and holds
/// no state between calls. Concurrent misses on the same key each compute
/// and write; the store keeps the last write.
#[derive(Clone)]
pub struct KvCacheable {
    store: Arc<dyn KvStore>,
    options: CommonOptions,
}

impl fmt::Debug for KvCacheable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KvCacheable")
            .field("options", &self.options)
            .field("store", &"<KvStore>")
            .finish()
    }
}

impl KvCacheable {
    /// Creates a wrapper with default common options
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self::with_options(store, CommonOptions::default())
    }

    /// Creates a wrapper with the given common options
    pub fn with_options(store: Arc<dyn KvStore>, options: CommonOptions) -> Self {
        Self { store, options }
    }

    /// Returns the cached value for `key`, or produces, decides and stores it.
    ///
    /// Store, producer and controller errors are returned unchanged. A failed
    /// write fails the call even though the value was computed.
    pub async fn invoke<T>(
        &self,
        key: &str,
        producer: Producer<'_, T>,
        controller: impl Into<Controller<T>>,
    ) -> Result<T, DomainError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        let controller = controller.into();

        if let Some(cached) = self.store.get_json::<T>(key).await? {
            if self.options.debug {
                info!(key = %key, "cache hit");
            }
            return Ok(cached);
        }

        let value = producer.produce().await?;
        let resolution = resolver::resolve(&value, &controller, &self.options).await?;

        if resolution.cacheable {
            self.store.put_json(key, &value, &resolution.options).await?;

            if self.options.debug {
                info!(key = %key, "cache set");
            }
        }

        Ok(value)
    }

    /// [`invoke`](Self::invoke) without a controller
    pub async fn invoke_default<T>(
        &self,
        key: &str,
        producer: Producer<'_, T>,
    ) -> Result<T, DomainError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        self.invoke(key, producer, Controller::Absent).await
    }
}
