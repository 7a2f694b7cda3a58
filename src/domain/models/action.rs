//! Actions and the asynchronous handles they may carry.

use std::fmt;
use std::future::Future;

use futures::future::{FutureExt, LocalBoxFuture, Shared};

/// A discrete, immutable description of a state change request.
///
/// Actions are produced by application code during a render pass and consumed
/// by the host reducer. An action may carry an [`AsyncHandle`] in its payload;
/// the wait enhancer mirrors such handles into the side channel so the
/// convergence loop can await them.
///
/// # Examples
///
/// ```
/// use settle::domain::models::{Action, AsyncHandle};
///
/// #[derive(Debug, Clone)]
/// enum PageAction {
///     Fetch(AsyncHandle<String, String>),
///     Loaded(String),
/// }
///
/// impl Action for PageAction {
///     type Output = String;
///     type Error = String;
///
///     fn action_type(&self) -> &str {
///         match self {
///             Self::Fetch(_) => "FETCH",
///             Self::Loaded(_) => "LOADED",
///         }
///     }
///
///     fn async_payload(&self) -> Option<AsyncHandle<String, String>> {
///         match self {
///             Self::Fetch(handle) => Some(handle.clone()),
///             Self::Loaded(_) => None,
///         }
///     }
/// }
/// ```
pub trait Action: Clone + fmt::Debug {
    /// Value an attached handle settles with on success.
    type Output: Clone + fmt::Debug + 'static;

    /// Value an attached handle settles with on failure.
    type Error: Clone + fmt::Debug + 'static;

    /// Type discriminator, used for logging and statistics.
    fn action_type(&self) -> &str;

    /// The conventional payload slot for an asynchronous handle.
    ///
    /// Read by [`PayloadClassifier`](crate::domain::ports::PayloadClassifier).
    fn async_payload(&self) -> Option<AsyncHandle<Self::Output, Self::Error>> {
        None
    }
}

/// Handle to a single pending operation that settles with `Ok(T)` or `Err(E)`.
///
/// Handles are cheap to clone; every clone observes the same underlying
/// operation, which runs at most once. They are `!Send`: the convergence
/// engine runs on a single logical thread of control.
pub struct AsyncHandle<T: 'static, E: 'static> {
    inner: Shared<LocalBoxFuture<'static, Result<T, E>>>,
}

impl<T, E> AsyncHandle<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    /// Wrap a future producing the operation's result.
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, E>> + 'static,
    {
        Self {
            inner: future.boxed_local().shared(),
        }
    }

    /// A handle that is already settled with a success value.
    pub fn resolved(value: T) -> Self {
        Self::new(futures::future::ready(Ok(value)))
    }

    /// A handle that is already settled with a failure value.
    pub fn rejected(error: E) -> Self {
        Self::new(futures::future::ready(Err(error)))
    }

    /// Whether the operation has settled and its result is cached.
    pub fn is_settled(&self) -> bool {
        self.inner.peek().is_some()
    }

    /// Whether both handles observe the same operation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.inner.ptr_eq(&other.inner)
    }

    /// Wait for the operation to settle.
    pub async fn settle(self) -> Result<T, E> {
        self.inner.await
    }
}

impl<T: 'static, E: 'static> Clone for AsyncHandle<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static, E: 'static> fmt::Debug for AsyncHandle<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncHandle").finish_non_exhaustive()
    }
}
