//! Side-channel transition function.
//!
//! Records pending handles and round statistics. Host actions pass through
//! untouched.

use crate::domain::models::{Action, LiftedAction, WaitAction, WaitState};

/// Apply one lifted action to the side-channel state.
pub fn reduce<A: Action>(state: &mut WaitState<A>, action: &LiftedAction<A>) {
    match action {
        LiftedAction::Wait(WaitAction::AddPending(entry)) => {
            state.pending.push(entry.clone());
        }
        LiftedAction::Wait(WaitAction::ClearPending) => {
            state.pending.clear();
        }
        LiftedAction::Wait(WaitAction::RecordStatistics(stats)) => {
            state.statistics.push(stats.clone());
        }
        LiftedAction::App(_) => {}
    }
}
