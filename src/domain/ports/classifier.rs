use crate::domain::models::{Action, AsyncHandle};

/// Port deciding whether a dispatched action carries asynchronous work.
///
/// Called once for every action dispatched through a wait-enhanced store,
/// before the action reaches the host reducer. Implementations must be pure
/// and must not panic: a panic propagates out of `dispatch` unmodified.
///
/// Closures with the signature `Fn(&A) -> Option<AsyncHandle<..>>` implement
/// this trait, so ad-hoc classification does not need a named type.
pub trait ActionClassifier<A: Action> {
    /// Extract the handle carried by `action`, if any
    fn classify(&self, action: &A) -> Option<AsyncHandle<A::Output, A::Error>>;
}

impl<A, F> ActionClassifier<A> for F
where
    A: Action,
    F: Fn(&A) -> Option<AsyncHandle<A::Output, A::Error>>,
{
    fn classify(&self, action: &A) -> Option<AsyncHandle<A::Output, A::Error>> {
        self(action)
    }
}

/// Default classifier: reads the action's conventional payload slot.
///
/// See [`Action::async_payload`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadClassifier;

impl<A: Action> ActionClassifier<A> for PayloadClassifier {
    fn classify(&self, action: &A) -> Option<AsyncHandle<A::Output, A::Error>> {
        action.async_payload()
    }
}
