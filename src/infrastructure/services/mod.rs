//! Infrastructure services

mod cacheable_service;

pub use cacheable_service::KvCacheable;
