//! Per-call controller: static decision or a function of the computed value

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{self, BoxFuture};

use super::decision::CacheDecision;
use crate::domain::DomainError;

type DecisionFuture = BoxFuture<'static, Result<CacheDecision, DomainError>>;

type DecideFn<T> = dyn Fn(&T) -> DecisionFuture + Send + Sync;

/// Decides, per call, whether and how a computed value is cached
pub enum Controller<T> {
    /// No controller: cache with the wrapper defaults only
    Absent,
    /// Fixed decision known before the value exists
    Static(CacheDecision),
    /// Decision computed from the freshly produced value
    Dynamic(Arc<DecideFn<T>>),
}

impl<T> Controller<T> {
    /// Synchronous decision function
    pub fn from_fn<F, D>(f: F) -> Self
    where
        F: Fn(&T) -> D + Send + Sync + 'static,
        D: Into<CacheDecision>,
    {
        Self::Dynamic(Arc::new(move |value: &T| -> DecisionFuture {
            let decision = f(value).into();
            Box::pin(future::ready(Ok(decision)))
        }))
    }

    /// Synchronous decision function that may fail
    pub fn try_from_fn<F>(f: F) -> Self
    where
        F: Fn(&T) -> Result<CacheDecision, DomainError> + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(move |value: &T| -> DecisionFuture {
            Box::pin(future::ready(f(value)))
        }))
    }

    /// Asynchronous decision function.
    ///
    /// The returned future must own its data; clone what it needs out of the
    /// value before the `async` block.
    pub fn from_async_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(&T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<CacheDecision, DomainError>> + Send + 'static,
    {
        Self::Dynamic(Arc::new(move |value: &T| -> DecisionFuture {
            Box::pin(f(value))
        }))
    }

    /// Produces the decision for `value`. Absent yields the default decision.
    pub async fn decide(&self, value: &T) -> Result<CacheDecision, DomainError> {
        match self {
            Controller::Absent => Ok(CacheDecision::default()),
            Controller::Static(decision) => Ok(decision.clone()),
            Controller::Dynamic(decide) => decide(value).await,
        }
    }
}

impl<T> Default for Controller<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Clone for Controller<T> {
    fn clone(&self) -> Self {
        match self {
            Controller::Absent => Controller::Absent,
            Controller::Static(decision) => Controller::Static(decision.clone()),
            Controller::Dynamic(decide) => Controller::Dynamic(Arc::clone(decide)),
        }
    }
}

impl<T> fmt::Debug for Controller<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Controller::Absent => write!(f, "Absent"),
            Controller::Static(decision) => f.debug_tuple("Static").field(decision).finish(),
            Controller::Dynamic(_) => write!(f, "Dynamic(<fn>)"),
        }
    }
}

impl<T> From<bool> for Controller<T> {
    fn from(cacheable: bool) -> Self {
        Self::Static(CacheDecision::from(cacheable))
    }
}

impl<T> From<CacheDecision> for Controller<T> {
    fn from(decision: CacheDecision) -> Self {
        Self::Static(decision)
    }
}

impl<T> From<Option<CacheDecision>> for Controller<T> {
    fn from(decision: Option<CacheDecision>) -> Self {
        decision.map_or(Self::Absent, Self::Static)
    }
}
