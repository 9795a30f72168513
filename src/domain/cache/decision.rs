//! Per-call cacheability decisions

use serde::{Deserialize, Serialize};

use super::options::PutOptions;

/// Whether a computed value gets written, and with which put options
///
/// `cacheable` defaults to `true` when omitted. The boolean shorthand
/// converts through `From<bool>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheDecision {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cacheable: Option<bool>,
    #[serde(flatten)]
    pub options: PutOptions,
}

impl CacheDecision {
    /// Cache the value with no extra put options
    pub fn cache() -> Self {
        Self {
            cacheable: Some(true),
            options: PutOptions::default(),
        }
    }

    /// Do not cache the value
    pub fn skip() -> Self {
        Self {
            cacheable: Some(false),
            options: PutOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PutOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_expiration(mut self, expiration: u64) -> Self {
        self.options.expiration = Some(expiration);
        self
    }

    pub fn with_expiration_ttl(mut self, ttl: u64) -> Self {
        self.options.expiration_ttl = Some(ttl);
        self
    }

    pub fn is_cacheable(&self) -> bool {
        self.cacheable.unwrap_or(true)
    }
}

impl From<bool> for CacheDecision {
    fn from(cacheable: bool) -> Self {
        Self {
            cacheable: Some(cacheable),
            options: PutOptions::default(),
        }
    }
}

impl From<PutOptions> for CacheDecision {
    fn from(options: PutOptions) -> Self {
        Self {
            cacheable: None,
            options,
        }
    }
}
