//! Store parameters passed through to `put`

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::DomainError;

/// Name of the decision flag; never forwarded to the store
pub const CACHEABLE_FIELD: &str = "cacheable";

/// Parameters for a single store write
///
/// Serializes in camelCase and omits unset fields, so an empty bag is `{}`.
/// Parameters the core does not know about travel in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutOptions {
    /// Absolute expiry, seconds since the UNIX epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<u64>,
    /// Expiry relative to the write, in seconds
    ///
    /// `expirationttl` is what the `config` crate hands over after lowercasing.
    #[serde(
        default,
        alias = "expiration_ttl",
        alias = "expirationttl",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration_ttl: Option<u64>,
    /// Arbitrary metadata stored alongside the value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    /// Store-specific parameters, passed through untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the absolute expiry (seconds since epoch)
    pub fn with_expiration(mut self, expiration: u64) -> Self {
        self.expiration = Some(expiration);
        self
    }

    /// Sets the relative expiry in seconds
    pub fn with_expiration_ttl(mut self, ttl: u64) -> Self {
        self.expiration_ttl = Some(ttl);
        self
    }

    /// Attaches metadata to the entry
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Adds a store-specific parameter
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();

        if name != CACHEABLE_FIELD {
            self.extra.insert(name, value.into());
        }

        self
    }

    pub fn is_empty(&self) -> bool {
        self.expiration.is_none()
            && self.expiration_ttl.is_none()
            && self.metadata.is_none()
            && self.extra.is_empty()
    }

    /// Shallow merge with `self` as base: every field set on `overrides` wins.
    ///
    /// `extra` is merged key by key. A `cacheable` entry is dropped from the
    /// result whichever side it came from.
    pub fn merged_with(&self, overrides: &PutOptions) -> PutOptions {
        let mut extra = self.extra.clone();
        extra.extend(
            overrides
                .extra
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        extra.remove(CACHEABLE_FIELD);

        PutOptions {
            expiration: overrides.expiration.or(self.expiration),
            expiration_ttl: overrides.expiration_ttl.or(self.expiration_ttl),
            metadata: overrides
                .metadata
                .clone()
                .or_else(|| self.metadata.clone()),
            extra,
        }
    }

    /// Absolute expiry in seconds for a write happening at `now_secs`.
    ///
    /// The earlier of `expiration` and `now + expirationTtl`; `None` when
    /// neither is set.
    pub fn expires_at(&self, now_secs: u64) -> Result<Option<u64>, DomainError> {
        let relative = match self.expiration_ttl {
            Some(0) => {
                return Err(DomainError::validation(
                    "expirationTtl must be greater than zero",
                ));
            }
            Some(ttl) => Some(now_secs.saturating_add(ttl)),
            None => None,
        };

        if let Some(expiration) = self.expiration {
            if expiration <= now_secs {
                return Err(DomainError::validation(format!(
                    "expiration {} is not in the future",
                    expiration
                )));
            }
        }

        Ok(match (self.expiration, relative) {
            (Some(absolute), Some(relative)) => Some(absolute.min(relative)),
            (absolute, relative) => absolute.or(relative),
        })
    }
}

/// Wrapper-level options, fixed when the decorator is built
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CommonOptions {
    /// Emits "cache hit" / "cache set" events
    #[serde(default)]
    pub debug: bool,
    /// Base put options for every write
    #[serde(default)]
    pub defaults: PutOptions,
}

impl CommonOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_defaults(mut self, defaults: PutOptions) -> Self {
        self.defaults = defaults;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_options_serialize_to_empty_object() {
        let json = serde_json::to_string(&PutOptions::new()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_serializes_camel_case() {
        let options = PutOptions::new()
            .with_expiration_ttl(100)
            .with_param("cacheTtl", 30);

        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value, json!({ "expirationTtl": 100, "cacheTtl": 30 }));
    }

    #[test]
    fn test_override_wins_on_conflict() {
        let common = PutOptions::new().with_expiration(100);
        let call = PutOptions::new().with_expiration(200);

        let merged = common.merged_with(&call);
        assert_eq!(merged, PutOptions::new().with_expiration(200));
    }

    #[test]
    fn test_base_fields_survive_merge() {
        let common = PutOptions::new()
            .with_expiration_ttl(3600)
            .with_metadata(json!({ "source": "default" }))
            .with_param("region", "eu");
        let call = PutOptions::new()
            .with_metadata(json!({ "source": "call" }))
            .with_param("tier", "hot");

        let merged = common.merged_with(&call);

        assert_eq!(merged.expiration_ttl, Some(3600));
        assert_eq!(merged.metadata, Some(json!({ "source": "call" })));
        assert_eq!(merged.extra.get("region"), Some(&json!("eu")));
        assert_eq!(merged.extra.get("tier"), Some(&json!("hot")));
    }

    #[test]
    fn test_merge_does_not_mutate_base() {
        let common = PutOptions::new().with_expiration_ttl(60);
        let _ = common.merged_with(&PutOptions::new().with_expiration_ttl(10));

        assert_eq!(common.expiration_ttl, Some(60));
    }

    #[test]
    fn test_cacheable_never_reaches_extra() {
        let options = PutOptions::new().with_param(CACHEABLE_FIELD, false);
        assert!(options.is_empty());

        let mut base = PutOptions::new();
        base.extra.insert(CACHEABLE_FIELD.to_string(), json!(true));

        let merged = base.merged_with(&PutOptions::new());
        assert!(merged.is_empty());
    }

    #[test]
    fn test_expires_at_relative() {
        let options = PutOptions::new().with_expiration_ttl(60);
        assert_eq!(options.expires_at(1_000).unwrap(), Some(1_060));
    }

    #[test]
    fn test_expires_at_picks_earliest() {
        let options = PutOptions::new()
            .with_expiration(1_030)
            .with_expiration_ttl(60);
        assert_eq!(options.expires_at(1_000).unwrap(), Some(1_030));
    }

    #[test]
    fn test_expires_at_none_without_expiry() {
        assert_eq!(PutOptions::new().expires_at(1_000).unwrap(), None);
    }

    #[test]
    fn test_expires_at_rejects_zero_ttl() {
        let result = PutOptions::new().with_expiration_ttl(0).expires_at(1_000);
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_expires_at_rejects_past_expiration() {
        let result = PutOptions::new().with_expiration(999).expires_at(1_000);
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_lowercased_ttl_is_not_an_extra_param() {
        let options: PutOptions =
            serde_json::from_value(json!({ "expirationttl": 60, "region": "eu" })).unwrap();

        assert_eq!(options.expiration_ttl, Some(60));
        assert!(!options.extra.contains_key("expirationttl"));
        assert_eq!(options.extra.get("region"), Some(&json!("eu")));
    }

    #[test]
    fn test_common_options_deserialize() {
        let options: CommonOptions = serde_json::from_value(json!({
            "debug": true,
            "defaults": { "expirationTtl": 300 }
        }))
        .unwrap();

        assert!(options.debug);
        assert_eq!(options.defaults, PutOptions::new().with_expiration_ttl(300));
    }
}
