//! Outcome reducer: turns drained pending entries into settled outcomes.
//!
//! Failures are folded into [`Outcome::Rejected`] rather than propagated, so
//! one failing fetch never aborts the rest of its round.

use futures::future::join_all;
use tracing::debug;

use crate::domain::models::{Action, Outcome, PendingEntry};

/// Wait for one entry's handle and record how it settled.
pub async fn settle_entry<A: Action>(entry: PendingEntry<A>) -> Outcome<A> {
    let PendingEntry { action, handle } = entry;

    match handle.settle().await {
        Ok(result) => Outcome::Resolved { action, result },
        Err(error) => {
            debug!(action_type = action.action_type(), error = ?error, "pending action rejected");
            Outcome::Rejected { action, error }
        }
    }
}

/// Settle a drained batch concurrently.
///
/// Outcomes are returned in drain order regardless of completion order.
pub async fn settle_all<A: Action>(entries: Vec<PendingEntry<A>>) -> Vec<Outcome<A>> {
    join_all(entries.into_iter().map(settle_entry)).await
}
