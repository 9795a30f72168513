//! Value producers, normalized to a single awaitable

use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;
use tokio::task::JoinHandle;

use crate::domain::DomainError;

/// The operation whose result gets cached
///
/// Every form is normalized to "await to get a `T`". Closures and futures are
/// lazy: nothing runs unless the cache misses. A spawned task is already in
/// flight and is only awaited on a miss.
pub struct Producer<'a, T> {
    future: BoxFuture<'a, Result<T, DomainError>>,
}

impl<'a, T: Send + 'a> Producer<'a, T> {
    /// Synchronous callable
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnOnce() -> T + Send + 'a,
    {
        Self {
            future: Box::pin(async move { Ok::<_, DomainError>(f()) }),
        }
    }

    /// Synchronous callable that may fail
    pub fn try_from_fn<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<T, DomainError> + Send + 'a,
    {
        Self {
            future: Box::pin(async move { f() }),
        }
    }

    /// Asynchronous callable
    pub fn from_async_fn<F, Fut>(f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = Result<T, DomainError>> + Send + 'a,
    {
        Self {
            future: Box::pin(async move { f().await }),
        }
    }

    /// A future built by the caller
    pub fn from_future<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = Result<T, DomainError>> + Send + 'a,
    {
        Self {
            future: Box::pin(future),
        }
    }

    /// A task already running on the runtime
    pub fn from_task(handle: JoinHandle<Result<T, DomainError>>) -> Self
    where
        T: 'static,
    {
        Self {
            future: Box::pin(async move {
                match handle.await {
                    Ok(result) => result,
                    Err(e) => Err(DomainError::producer(format!(
                        "Producer task failed: {}",
                        e
                    ))),
                }
            }),
        }
    }

    /// Awaits the value
    pub async fn produce(self) -> Result<T, DomainError> {
        self.future.await
    }
}

impl<T> fmt::Debug for Producer<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer").finish_non_exhaustive()
    }
}
