//! Wait enhancer: lifts a host store so it records asynchronous work.
//!
//! The enhanced store keeps a [`ComposedState`] pairing the host state with
//! the side-channel state. Every action runs through both reducers, and every
//! action carrying an [`AsyncHandle`](crate::domain::models::AsyncHandle) is
//! mirrored into the side channel before the host reducer sees it.

use std::fmt;

use tracing::{debug, trace};

use crate::domain::models::{
    Action, LiftedAction, PendingEntry, WaitAction, WaitState, DEFAULT_STORE_NAME,
};
use crate::domain::ports::{
    ActionClassifier, PayloadClassifier, Reducer, SideChannelHost, StateContainer,
};
use crate::services::store::Store;
use crate::services::wait_reducer;

/// Host state paired with the side-channel state
#[derive(Debug, Clone)]
pub struct ComposedState<S, A: Action> {
    pub primary: S,
    pub side: WaitState<A>,
}

impl<S, A: Action> ComposedState<S, A> {
    pub fn new(primary: S) -> Self {
        Self {
            primary,
            side: WaitState::new(),
        }
    }
}

/// Lift a host reducer to operate on [`ComposedState`].
///
/// Host actions reach `reducer`; wait actions leave the host state as it was.
/// The side-channel reducer sees every action.
pub fn lift_reducer<S, A, R>(reducer: R) -> impl Fn(&mut ComposedState<S, A>, &LiftedAction<A>)
where
    A: Action,
    R: Reducer<S, A>,
{
    move |state: &mut ComposedState<S, A>, action: &LiftedAction<A>| {
        if let LiftedAction::App(app_action) = action {
            reducer.reduce(&mut state.primary, app_action);
        }
        wait_reducer::reduce(&mut state.side, action);
    }
}

/// Route one host action through a lifted dispatch function.
///
/// A handle found by `classifier` is recorded with an add-pending action
/// before the original action is forwarded. The original action is returned,
/// never the handle.
pub fn lift_dispatch<A, C, D>(classifier: &C, dispatch: &mut D, action: A) -> A
where
    A: Action,
    C: ActionClassifier<A> + ?Sized,
    D: FnMut(LiftedAction<A>),
{
    if let Some(handle) = classifier.classify(&action) {
        debug!(action_type = action.action_type(), "recording pending action");
        dispatch(LiftedAction::Wait(WaitAction::AddPending(PendingEntry::new(
            action.clone(),
            handle,
        ))));
    }

    dispatch(LiftedAction::App(action.clone()));
    action
}

/// Store enhancer installing a side channel on a host store.
///
/// # Examples
///
/// ```
/// use settle::domain::models::{Action, AsyncHandle};
/// use settle::domain::ports::StateContainer;
/// use settle::services::WaitEnhancer;
///
/// #[derive(Debug, Clone)]
/// struct Load(AsyncHandle<u32, String>);
///
/// impl Action for Load {
///     type Output = u32;
///     type Error = String;
///     fn action_type(&self) -> &str { "LOAD" }
///     fn async_payload(&self) -> Option<AsyncHandle<u32, String>> { Some(self.0.clone()) }
/// }
///
/// let mut store = WaitEnhancer::new().create_store(|count: &mut u32, _: &Load| *count += 1, 0);
/// store.dispatch(Load(AsyncHandle::resolved(1)));
///
/// assert_eq!(*store.state(), 1);
/// assert_eq!(store.wait_state().pending.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct WaitEnhancer<C = PayloadClassifier> {
    classifier: C,
    store_name: String,
}

impl WaitEnhancer<PayloadClassifier> {
    pub fn new() -> Self {
        Self {
            classifier: PayloadClassifier,
            store_name: DEFAULT_STORE_NAME.to_string(),
        }
    }
}

impl Default for WaitEnhancer<PayloadClassifier> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> WaitEnhancer<C> {
    /// Replace the classifier used to detect asynchronous work
    pub fn with_classifier<C2>(self, classifier: C2) -> WaitEnhancer<C2> {
        WaitEnhancer {
            classifier,
            store_name: self.store_name,
        }
    }

    /// Register the side channel under `name` instead of the default
    pub fn with_store_name(mut self, name: impl Into<String>) -> Self {
        self.store_name = name.into();
        self
    }

    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    /// Create an enhanced store from a host reducer and initial state
    pub fn create_store<S, A, R>(self, reducer: R, initial_state: S) -> WaitStore<S, A, C>
    where
        S: 'static,
        A: Action + 'static,
        R: Reducer<S, A> + 'static,
        C: ActionClassifier<A>,
    {
        debug!(store_name = %self.store_name, "creating wait-enhanced store");
        WaitStore {
            inner: Store::new(lift_reducer(reducer), ComposedState::new(initial_state)),
            classifier: self.classifier,
            store_name: self.store_name,
        }
    }
}

/// A host store lifted by [`WaitEnhancer`]
///
/// Behaves as the host store through [`StateContainer`]: `state()` returns the
/// host state and `dispatch` returns the dispatched action.
pub struct WaitStore<S, A: Action, C = PayloadClassifier> {
    inner: Store<ComposedState<S, A>, LiftedAction<A>>,
    classifier: C,
    store_name: String,
}

impl<S, A, C> WaitStore<S, A, C>
where
    A: Action,
    C: ActionClassifier<A>,
{
    /// Name the side channel is registered under
    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    /// Current side-channel state
    pub fn wait_state(&self) -> &WaitState<A> {
        &self.inner.state().side
    }

    /// Dispatch an action to the side channel only
    pub fn dispatch_wait(&mut self, action: WaitAction<A>) {
        trace!(action_type = action.action_type(), "side-channel dispatch");
        self.inner.dispatch(LiftedAction::Wait(action));
    }

    /// Full composed state
    pub fn composed_state(&self) -> &ComposedState<S, A> {
        self.inner.state()
    }
}

impl<S, A, C> StateContainer for WaitStore<S, A, C>
where
    A: Action,
    C: ActionClassifier<A>,
{
    type State = S;
    type Action = A;

    fn dispatch(&mut self, action: A) -> A {
        let inner = &mut self.inner;
        lift_dispatch(
            &self.classifier,
            &mut |lifted| {
                inner.dispatch(lifted);
            },
            action,
        )
    }

    fn state(&self) -> &S {
        &self.inner.state().primary
    }
}

impl<S, A, C> SideChannelHost for WaitStore<S, A, C>
where
    A: Action,
    C: ActionClassifier<A>,
{
    type Action = A;

    fn side_channel(&self, name: &str) -> Option<&WaitState<A>> {
        (name == self.store_name).then(|| self.wait_state())
    }

    fn dispatch_side(&mut self, name: &str, action: WaitAction<A>) -> bool {
        if name != self.store_name {
            return false;
        }
        self.dispatch_wait(action);
        true
    }
}

impl<S: fmt::Debug, A: Action, C> fmt::Debug for WaitStore<S, A, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state();
        f.debug_struct("WaitStore")
            .field("store_name", &self.store_name)
            .field("state", &state.primary)
            .field("pending", &state.side.pending.len())
            .field("statistics", &state.side.statistics.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::AsyncHandle;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone)]
    enum CounterAction {
        Increment,
        Fetch(AsyncHandle<i32, String>),
    }

    impl Action for CounterAction {
        type Output = i32;
        type Error = String;

        fn action_type(&self) -> &str {
            match self {
                Self::Increment => "INCREMENT",
                Self::Fetch(_) => "FETCH",
            }
        }

        fn async_payload(&self) -> Option<AsyncHandle<i32, String>> {
            match self {
                Self::Fetch(handle) => Some(handle.clone()),
                Self::Increment => None,
            }
        }
    }

    fn counter(state: &mut i32, action: &CounterAction) {
        if let CounterAction::Increment = action {
            *state += 1;
        }
    }

    #[test]
    fn test_enhanced_store_performs_actions() {
        let mut store = WaitEnhancer::new().create_store(counter, 0);
        assert_eq!(*store.state(), 0);

        store.dispatch(CounterAction::Increment);
        assert_eq!(*store.state(), 1);

        store.dispatch(CounterAction::Increment);
        assert_eq!(*store.state(), 2);
    }

    #[test]
    fn test_collects_async_actions() {
        let mut store = WaitEnhancer::new().create_store(counter, 0);
        assert!(store.wait_state().pending.is_empty());

        let handle = AsyncHandle::resolved(1);
        let returned = store.dispatch(CounterAction::Fetch(handle.clone()));

        let pending = &store.wait_state().pending;
        assert_eq!(pending.len(), 1);
        assert!(pending[0].handle.ptr_eq(&handle));
        assert!(matches!(pending[0].action, CounterAction::Fetch(_)));
        assert!(matches!(returned, CounterAction::Fetch(_)));
        assert_eq!(*store.state(), 0);
    }

    #[test]
    fn test_clear_pending_through_side_channel() {
        let mut store = WaitEnhancer::new().create_store(counter, 0);
        store.dispatch(CounterAction::Fetch(AsyncHandle::resolved(1)));
        assert_eq!(store.wait_state().pending.len(), 1);

        store.dispatch_wait(WaitAction::ClearPending);
        assert!(store.wait_state().pending.is_empty());
    }

    #[test]
    fn test_wait_actions_do_not_touch_host_state() {
        let mut store = WaitEnhancer::new().create_store(counter, 7);
        store.dispatch_wait(WaitAction::ClearPending);
        assert_eq!(*store.state(), 7);
        assert_eq!(store.composed_state().primary, 7);
    }

    #[test]
    fn test_store_name_option() {
        let named = WaitEnhancer::new()
            .with_store_name("test")
            .create_store(counter, 0);
        let default = WaitEnhancer::new().create_store(counter, 0);

        assert!(named.side_channel("test").is_some());
        assert!(named.side_channel(DEFAULT_STORE_NAME).is_none());
        assert!(default.side_channel("test").is_none());
        assert!(default.side_channel(DEFAULT_STORE_NAME).is_some());
    }

    #[test]
    fn test_dispatch_side_respects_store_name() {
        let mut store = WaitEnhancer::new()
            .with_store_name("test")
            .create_store(counter, 0);
        store.dispatch(CounterAction::Fetch(AsyncHandle::resolved(1)));

        assert!(!store.dispatch_side("other", WaitAction::ClearPending));
        assert_eq!(store.wait_state().pending.len(), 1);

        assert!(store.dispatch_side("test", WaitAction::ClearPending));
        assert!(store.wait_state().pending.is_empty());
    }

    #[test]
    fn test_custom_classifier_called_on_every_dispatch() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = seen.clone();
        let classifier = move |action: &CounterAction| -> Option<AsyncHandle<i32, String>> {
            log.borrow_mut().push(action.action_type().to_string());
            None
        };

        let mut store = WaitEnhancer::new()
            .with_classifier(classifier)
            .create_store(counter, 0);
        store.dispatch(CounterAction::Increment);
        store.dispatch(CounterAction::Fetch(AsyncHandle::resolved(1)));

        assert_eq!(*seen.borrow(), vec!["INCREMENT", "FETCH"]);
        assert!(store.wait_state().pending.is_empty());
    }

    #[test]
    fn test_lift_dispatch_records_before_forwarding() {
        let mut order = Vec::new();
        let action = CounterAction::Fetch(AsyncHandle::resolved(3));

        lift_dispatch(
            &PayloadClassifier,
            &mut |lifted: LiftedAction<CounterAction>| {
                order.push(lifted.action_type().to_string());
            },
            action,
        );

        assert_eq!(order, vec!["@@wait/ADD_PENDING", "FETCH"]);
    }

    #[test]
    #[should_panic(expected = "classifier failed")]
    fn test_classifier_panic_propagates() {
        let classifier = |_: &CounterAction| -> Option<AsyncHandle<i32, String>> {
            panic!("classifier failed")
        };
        let mut store = WaitEnhancer::new()
            .with_classifier(classifier)
            .create_store(counter, 0);
        store.dispatch(CounterAction::Increment);
    }
}
