//! Pending work and the records produced once it settles.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::action::{Action, AsyncHandle};

/// An action together with the handle it triggered.
///
/// Lives in the side channel from dispatch until the convergence loop drains
/// it, which happens at most once.
#[derive(Debug, Clone)]
pub struct PendingEntry<A: Action> {
    pub action: A,
    pub handle: AsyncHandle<A::Output, A::Error>,
}

impl<A: Action> PendingEntry<A> {
    pub fn new(action: A, handle: AsyncHandle<A::Output, A::Error>) -> Self {
        Self { action, handle }
    }
}

/// Settled result of one pending entry.
#[derive(Debug, Clone)]
pub enum Outcome<A: Action> {
    /// The handle settled successfully.
    Resolved { action: A, result: A::Output },

    /// The handle settled with a failure.
    Rejected { action: A, error: A::Error },
}

impl<A: Action> Outcome<A> {
    /// The action whose handle produced this outcome.
    pub fn action(&self) -> &A {
        match self {
            Self::Resolved { action, .. } | Self::Rejected { action, .. } => action,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    pub fn result(&self) -> Option<&A::Output> {
        match self {
            Self::Resolved { result, .. } => Some(result),
            Self::Rejected { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&A::Error> {
        match self {
            Self::Resolved { .. } => None,
            Self::Rejected { error, .. } => Some(error),
        }
    }
}

/// Outcomes of one completed convergence round.
///
/// Appended to the side channel after every round that awaited work;
/// the statistics list is append-only and ordered by round.
#[derive(Debug, Clone)]
pub struct RoundStatistics<A: Action> {
    /// 1-based round number within its run
    pub round: u32,

    /// Outcomes in drain order
    pub results: Vec<Outcome<A>>,

    /// Time from the start of the render to the last handle settling
    pub duration: Duration,

    pub completed_at: DateTime<Utc>,
}

impl<A: Action> RoundStatistics<A> {
    pub fn new(round: u32, results: Vec<Outcome<A>>, duration: Duration) -> Self {
        Self {
            round,
            results,
            duration,
            completed_at: Utc::now(),
        }
    }

    pub fn resolved_count(&self) -> usize {
        self.results.iter().filter(|o| o.is_resolved()).count()
    }

    pub fn rejected_count(&self) -> usize {
        self.results.len() - self.resolved_count()
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary::from(self)
    }
}

/// Serializable digest of a [`RoundStatistics`] record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u32,
    pub action_types: Vec<String>,
    pub resolved: usize,
    pub rejected: usize,
    pub duration_ms: u64,
    pub completed_at: DateTime<Utc>,
}

impl<A: Action> From<&RoundStatistics<A>> for RoundSummary {
    fn from(stats: &RoundStatistics<A>) -> Self {
        Self {
            round: stats.round,
            action_types: stats
                .results
                .iter()
                .map(|o| o.action().action_type().to_string())
                .collect(),
            resolved: stats.resolved_count(),
            rejected: stats.rejected_count(),
            duration_ms: u64::try_from(stats.duration.as_millis()).unwrap_or(u64::MAX),
            completed_at: stats.completed_at,
        }
    }
}
