//! In-memory host state container.
//!
//! `Store` is the plain container the wait enhancer wraps: a state value and a
//! reducer, with synchronous dispatch. It carries no side channel of its own.

use std::fmt;

use tracing::trace;

use crate::domain::models::{Action, WaitAction, WaitState};
use crate::domain::ports::{Reducer, SideChannelHost, StateContainer};

/// Minimal synchronous state container
pub struct Store<S, A> {
    state: S,
    reducer: Box<dyn Reducer<S, A>>,
}

impl<S, A> Store<S, A> {
    /// Create a store from a reducer and its initial state
    pub fn new<R>(reducer: R, initial_state: S) -> Self
    where
        R: Reducer<S, A> + 'static,
    {
        Self {
            state: initial_state,
            reducer: Box::new(reducer),
        }
    }

    /// Consume the store and return its state
    pub fn into_state(self) -> S {
        self.state
    }
}

impl<S, A> StateContainer for Store<S, A> {
    type State = S;
    type Action = A;

    fn dispatch(&mut self, action: A) -> A {
        self.reducer.reduce(&mut self.state, &action);
        action
    }

    fn state(&self) -> &S {
        &self.state
    }
}

impl<S, A: Action> SideChannelHost for Store<S, A> {
    type Action = A;

    fn side_channel(&self, _name: &str) -> Option<&WaitState<A>> {
        None
    }

    fn dispatch_side(&mut self, name: &str, action: WaitAction<A>) -> bool {
        trace!(
            store_name = name,
            action_type = action.action_type(),
            "plain store has no side channel"
        );
        false
    }
}

impl<S: fmt::Debug, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
