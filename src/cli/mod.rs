//! CLI module for kv-cacheable
//!
//! Provides subcommands:
//! - `exec`: run a command through the cache-aside wrapper
//! - `get`: print a stored value

pub mod exec;
pub mod get;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::domain::DomainError;
use crate::domain::cache::KvStore;
use crate::infrastructure::cache::{StoreConfig, StoreFactory};
use crate::infrastructure::logging;

/// kv-cacheable - Cache-aside wrapper over a key-value store
#[derive(Parser)]
#[command(name = "kv-cacheable")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a command, caching its output under a key
    Exec(exec::ExecArgs),

    /// Print the raw value stored under a key
    Get(get::GetArgs),
}

/// Loads `.env` and configuration, then installs logging
pub(crate) fn bootstrap() -> AppConfig {
    dotenvy::dotenv().ok();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            let config = AppConfig::default();
            logging::init_logging(&config.logging);
            tracing::warn!(error = %e, "Invalid configuration, using defaults");
            return config;
        }
    };

    logging::init_logging(&config.logging);
    config
}

/// Opens the configured store. Each CLI run is its own process, so an
/// in-memory store would never be read back.
pub(crate) async fn open_store(config: &StoreConfig) -> Result<Arc<dyn KvStore>, DomainError> {
    if !config.is_persistent() {
        return Err(DomainError::configuration(format!(
            "The CLI needs a persistent store, but store type is '{}'. \
             Set APP__STORE__TYPE=redis and APP__STORE__REDIS_URL",
            config.store_type
        )));
    }

    StoreFactory::new().create(config).await
}
