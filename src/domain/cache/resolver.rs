//! Option resolution: controller decision merged over the wrapper defaults

use super::controller::Controller;
use super::decision::CacheDecision;
use super::options::{CommonOptions, PutOptions};
use crate::domain::DomainError;

/// Outcome of resolving a controller against a computed value
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub cacheable: bool,
    /// Put options for the write; meaningless when `cacheable` is false
    pub options: PutOptions,
}

/// Resolves the controller for `value`, then merges its put options over
/// `common.defaults`. The controller is consulted only here, after the value
/// exists.
pub async fn resolve<T>(
    value: &T,
    controller: &Controller<T>,
    common: &CommonOptions,
) -> Result<Resolution, DomainError> {
    let decision = controller.decide(value).await?;
    Ok(resolve_decision(decision, common))
}

/// Call-level put options win over the defaults field by field; `cacheable`
/// is split off and never forwarded.
pub fn resolve_decision(decision: CacheDecision, common: &CommonOptions) -> Resolution {
    let cacheable = decision.is_cacheable();
    let options = common.defaults.merged_with(&decision.options);

    Resolution { cacheable, options }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn common(defaults: PutOptions) -> CommonOptions {
        CommonOptions::new().with_defaults(defaults)
    }

    #[tokio::test]
    async fn test_absent_controller_uses_defaults() {
        let common = common(PutOptions::new().with_expiration_ttl(3600));
        let resolution = resolve(&"x", &Controller::Absent, &common).await.unwrap();

        assert!(resolution.cacheable);
        assert_eq!(resolution.options, common.defaults);
    }

    #[tokio::test]
    async fn test_static_decision_overrides_defaults() {
        let common = common(PutOptions::new().with_expiration(100));
        let controller = Controller::Static(CacheDecision::default().with_expiration(200));

        let resolution = resolve(&"x", &controller, &common).await.unwrap();

        assert!(resolution.cacheable);
        assert_eq!(resolution.options, PutOptions::new().with_expiration(200));
    }

    #[tokio::test]
    async fn test_dynamic_decision_sees_value() {
        let controller = Controller::from_fn(|value: &&str| {
            if *value == "no cache" {
                CacheDecision::skip()
            } else {
                CacheDecision::default()
            }
        });

        let skipped = resolve(&"no cache", &controller, &CommonOptions::new())
            .await
            .unwrap();
        let cached = resolve(&"other", &controller, &CommonOptions::new())
            .await
            .unwrap();

        assert!(!skipped.cacheable);
        assert!(cached.cacheable);
    }

    #[tokio::test]
    async fn test_controller_error_propagates() {
        let controller: Controller<u8> =
            Controller::try_from_fn(|_| Err(DomainError::controller("bad value")));

        let result = resolve(&1, &controller, &CommonOptions::new()).await;
        assert!(matches!(result, Err(DomainError::Controller { .. })));
    }

    #[test]
    fn test_cacheable_true_with_ttl() {
        let decision: CacheDecision =
            serde_json::from_value(json!({ "cacheable": true, "expirationTtl": 100 })).unwrap();

        let resolution = resolve_decision(decision, &CommonOptions::new());

        assert!(resolution.cacheable);
        assert_eq!(
            serde_json::to_value(&resolution.options).unwrap(),
            json!({ "expirationTtl": 100 })
        );
    }

    #[test]
    fn test_non_cacheable_keeps_options_orthogonal() {
        let decision = CacheDecision::skip().with_expiration_ttl(50);
        let resolution = resolve_decision(decision, &CommonOptions::new());

        assert!(!resolution.cacheable);
        assert_eq!(resolution.options.expiration_ttl, Some(50));
    }

    #[test]
    fn test_bool_shorthand_matches_structured() {
        let common = common(PutOptions::new().with_expiration_ttl(10));

        assert_eq!(
            resolve_decision(true.into(), &common),
            resolve_decision(CacheDecision::cache(), &common)
        );
        assert_eq!(
            resolve_decision(false.into(), &common),
            resolve_decision(CacheDecision::skip(), &common)
        );
    }

    #[test]
    fn test_non_overridden_defaults_remain() {
        let common = common(
            PutOptions::new()
                .with_expiration_ttl(3600)
                .with_metadata(json!({ "owner": "wrapper" })),
        );
        let decision = CacheDecision::cache().with_expiration_ttl(60);

        let resolution = resolve_decision(decision, &common);

        assert_eq!(resolution.options.expiration_ttl, Some(60));
        assert_eq!(resolution.options.metadata, Some(json!({ "owner": "wrapper" })));
    }

    #[test]
    fn test_resolution_does_not_mutate_common() {
        let common = common(PutOptions::new().with_expiration(100));
        let before = common.clone();

        let _ = resolve_decision(CacheDecision::cache().with_expiration(999), &common);

        assert_eq!(common, before);
    }
}
