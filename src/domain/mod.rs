//! Domain layer - Cache-aside model and the store adapter contract

pub mod cache;
pub mod error;

pub use cache::{
    CacheDecision, CommonOptions, Controller, KvStore, KvStoreExt, Producer, PutOptions,
    Resolution,
};
pub use error::DomainError;
