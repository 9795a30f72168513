//! Store adapter trait definition

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use super::options::PutOptions;
use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Asynchronous key-value store the cache-aside wrapper reads and writes
///
/// Values cross this boundary as JSON text so the trait stays dyn-compatible.
/// Use [`KvStoreExt`] for typed access.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Gets the raw JSON text stored under `key`
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Writes raw JSON text under `key`, honouring the put options
    async fn put(&self, key: &str, value: &str, options: &PutOptions) -> Result<(), DomainError>;
}

/// Typed JSON access on top of [`KvStore`]
pub trait KvStoreExt: KvStore {
    /// Gets and decodes a JSON value
    fn get_json<'a, V>(
        &'a self,
        key: &'a str,
    ) -> impl std::future::Future<Output = Result<Option<V>, DomainError>> + Send
    where
        V: DeserializeOwned + Send,
    {
        async move {
            match self.get_raw(key).await? {
                Some(data) => {
                    let value: V = serde_json::from_str(&data).map_err(|e| {
                        DomainError::serialization(format!(
                            "Failed to deserialize value for key '{}': {}",
                            key, e
                        ))
                    })?;
                    Ok(Some(value))
                }
                None => Ok(None),
            }
        }
    }

    /// Encodes a value as JSON and writes it
    fn put_json<'a, V>(
        &'a self,
        key: &'a str,
        value: &'a V,
        options: &'a PutOptions,
    ) -> impl std::future::Future<Output = Result<(), DomainError>> + Send
    where
        V: Serialize + Sync,
    {
        async move {
            let data = serde_json::to_string(value).map_err(|e| {
                DomainError::serialization(format!(
                    "Failed to serialize value for key '{}': {}",
                    key, e
                ))
            })?;
            self.put(key, &data, options).await
        }
    }
}

impl<T: KvStore + ?Sized> KvStoreExt for T {}
