//! Side-channel state and the actions that drive it.

use super::action::Action;
use super::outcome::{PendingEntry, RoundStatistics};

/// Bookkeeping state kept next to the host application's state.
///
/// `pending` is non-empty only between a dispatch that added an entry and the
/// next drain.
#[derive(Debug, Clone)]
pub struct WaitState<A: Action> {
    pub pending: Vec<PendingEntry<A>>,
    pub statistics: Vec<RoundStatistics<A>>,
}

impl<A: Action> WaitState<A> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            statistics: Vec::new(),
        }
    }
}

impl<A: Action> Default for WaitState<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Actions understood by the side channel.
#[derive(Debug, Clone)]
pub enum WaitAction<A: Action> {
    /// Append one pending entry.
    AddPending(PendingEntry<A>),

    /// Reset the pending list to empty.
    ClearPending,

    /// Append one round's statistics.
    RecordStatistics(RoundStatistics<A>),
}

impl<A: Action> WaitAction<A> {
    pub fn action_type(&self) -> &'static str {
        match self {
            Self::AddPending(_) => "@@wait/ADD_PENDING",
            Self::ClearPending => "@@wait/CLEAR_PENDING",
            Self::RecordStatistics(_) => "@@wait/RECORD_STATISTICS",
        }
    }
}

/// Action type routed through a wait-enhanced store.
///
/// Host actions and side-channel actions share one closed sum so the composed
/// reducer can match on every kind.
#[derive(Debug, Clone)]
pub enum LiftedAction<A: Action> {
    App(A),
    Wait(WaitAction<A>),
}

impl<A: Action> LiftedAction<A> {
    pub fn action_type(&self) -> &str {
        match self {
            Self::App(action) => action.action_type(),
            Self::Wait(action) => action.action_type(),
        }
    }
}

impl<A: Action> From<WaitAction<A>> for LiftedAction<A> {
    fn from(action: WaitAction<A>) -> Self {
        Self::Wait(action)
    }
}
