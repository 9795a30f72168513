//! KV Cacheable
//!
//! A cache-aside wrapper over asynchronous key-value stores:
//! - Returns the stored value on a hit without running the producer
//! - On a miss, produces the value, lets a per-call controller inspect it,
//!   and writes it with the wrapper defaults merged under the call's options
//! - In-memory (moka) and Redis store adapters

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    CacheDecision, CommonOptions, Controller, DomainError, KvStore, KvStoreExt, Producer,
    PutOptions,
};
pub use infrastructure::services::KvCacheable;
