//! Cache domain - Decisions, option resolution and the store contract

mod controller;
mod decision;
mod options;
mod producer;
pub mod resolver;
mod store;

pub use controller::Controller;
pub use decision::CacheDecision;
pub use options::{CACHEABLE_FIELD, CommonOptions, PutOptions};
pub use producer::Producer;
pub use resolver::{Resolution, resolve, resolve_decision};
pub use store::{KvStore, KvStoreExt};

#[cfg(test)]
pub use store::MockKvStore;
