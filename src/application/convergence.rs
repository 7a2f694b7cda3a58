//! ConvergenceLoop - render until the async work a render triggers has settled
//!
//! Drives a synchronous render callback against a wait-enhanced store:
//! - Each round renders once, then drains the side channel's pending list
//! - Drained handles are settled concurrently and recorded as round statistics
//! - The loop re-renders until a render dispatches no async work or the round
//!   limit is reached
//!
//! Rounds are numbered from 1 and the limit is checked after draining, so a
//! `round_limit` of N renders at most N times and records at most N-1
//! statistics entries.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::domain::error::ConvergenceWarning;
use crate::domain::models::{
    Action, ConvergenceConfig, PendingEntry, RoundStatistics, WaitAction, MIN_USEFUL_ROUND_LIMIT,
};
use crate::domain::ports::SideChannelHost;
use crate::services::outcome::settle_all;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvergenceStatus {
    /// The final render dispatched no async work
    Converged,

    /// The round limit was reached with async work still pending
    Exhausted,

    /// The store has no side channel, so async work could not be observed
    Unobserved,
}

/// Result of one run together with what happened along the way
#[derive(Debug, Clone)]
pub struct ConvergenceReport<R> {
    pub run_id: Uuid,

    /// Return value of the final render
    pub result: R,

    pub status: ConvergenceStatus,

    /// Number of times the callback was invoked
    pub renders: u32,

    /// Configuration and unresolved-work diagnostics raised for this run
    pub warnings: Vec<ConvergenceWarning>,
}

impl<R> ConvergenceReport<R> {
    pub fn converged(&self) -> bool {
        self.status == ConvergenceStatus::Converged
    }
}

/// States of a single run
enum LoopPhase<R, A: Action> {
    Rendering,
    Draining { candidate: R, started: Instant },
    Awaiting {
        pending: Vec<PendingEntry<A>>,
        started: Instant,
    },
    Converged(R),
    Exhausted(R),
}

/// ConvergenceLoop - re-renders until dispatched async work has settled
///
/// Binds a render callback to its options once; every [`run`](Self::run)
/// then performs a full convergence against the store it is given.
///
/// # Examples
///
/// ```
/// use settle::application::ConvergenceLoop;
/// use settle::domain::models::{Action, AsyncHandle, ConvergenceConfig};
/// use settle::domain::ports::StateContainer;
/// use settle::services::{WaitEnhancer, WaitStore};
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
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let mut store = WaitEnhancer::new().create_store(|n: &mut u32, _: &Load| *n += 1, 0);
///
/// let mut render = ConvergenceLoop::new(
///     |store: &mut WaitStore<u32, Load>, greeting: &str| {
///         if *store.state() < 3 {
///             store.dispatch(Load(AsyncHandle::resolved(1)));
///         }
///         format!("{greeting} after {} loads", store.state())
///     },
///     ConvergenceConfig::default().with_round_limit(10),
/// );
///
/// let html = render.run(&mut store, "hello").await;
/// assert_eq!(html, "hello after 3 loads");
/// assert_eq!(store.wait_state().statistics.len(), 3);
/// # });
/// ```
pub struct ConvergenceLoop<F> {
    callback: F,
    config: ConvergenceConfig,
    warnings: Vec<ConvergenceWarning>,
}

impl<F> ConvergenceLoop<F> {
    /// Create a loop around `callback`
    ///
    /// A `round_limit` below 2 is accepted but warned about here, before any
    /// round runs: such a loop renders once and never waits.
    pub fn new(callback: F, config: ConvergenceConfig) -> Self {
        let mut warnings = Vec::new();

        if config.round_limit < MIN_USEFUL_ROUND_LIMIT {
            let warning = ConvergenceWarning::RoundLimitTooLow {
                round_limit: config.round_limit,
            };
            warn!(round_limit = config.round_limit, "{warning}");
            warnings.push(warning);
        }

        Self {
            callback,
            config,
            warnings,
        }
    }

    pub fn config(&self) -> &ConvergenceConfig {
        &self.config
    }

    /// Configuration warnings raised at construction
    pub fn warnings(&self) -> &[ConvergenceWarning] {
        &self.warnings
    }

    /// Converge and return the final render's result
    pub async fn run<H, Args, R>(&mut self, store: &mut H, args: &Args) -> R
    where
        H: SideChannelHost,
        Args: ?Sized,
        F: FnMut(&mut H, &Args) -> R,
    {
        self.run_with_report(store, args).await.result
    }

    /// Converge and return the final render's result with run diagnostics
    pub async fn run_with_report<H, Args, R>(
        &mut self,
        store: &mut H,
        args: &Args,
    ) -> ConvergenceReport<R>
    where
        H: SideChannelHost,
        Args: ?Sized,
        F: FnMut(&mut H, &Args) -> R,
    {
        let run_id = Uuid::new_v4();
        let span = info_span!(
            "converge",
            run_id = %run_id,
            round_limit = self.config.round_limit,
            store_name = %self.config.store_name,
        );

        self.drive(store, args, run_id).instrument(span).await
    }

    async fn drive<H, Args, R>(
        &mut self,
        store: &mut H,
        args: &Args,
        run_id: Uuid,
    ) -> ConvergenceReport<R>
    where
        H: SideChannelHost,
        Args: ?Sized,
        F: FnMut(&mut H, &Args) -> R,
    {
        let mut warnings = self.warnings.clone();
        let store_name = self.config.store_name.as_str();
        let round_limit = self.config.round_limit;

        if store.side_channel(store_name).is_none() {
            let warning = ConvergenceWarning::SideChannelMissing {
                store_name: store_name.to_string(),
            };
            warn!("{warning}");
            warnings.push(warning);

            let result = (self.callback)(store, args);
            return ConvergenceReport {
                run_id,
                result,
                status: ConvergenceStatus::Unobserved,
                renders: 1,
                warnings,
            };
        }

        let mut round: u32 = 1;
        let mut phase = LoopPhase::Rendering;

        loop {
            phase = match phase {
                LoopPhase::Rendering => {
                    debug!(round, "rendering");
                    let started = Instant::now();
                    let candidate = (self.callback)(store, args);
                    LoopPhase::Draining { candidate, started }
                }

                LoopPhase::Draining { candidate, started } => {
                    let pending = store
                        .side_channel(store_name)
                        .map(|side| side.pending.clone())
                        .unwrap_or_default();
                    store.dispatch_side(store_name, WaitAction::ClearPending);

                    if pending.is_empty() {
                        LoopPhase::Converged(candidate)
                    } else if round >= round_limit {
                        let warning = ConvergenceWarning::UnresolvedWork {
                            round,
                            abandoned: pending.len(),
                        };
                        warn!(round, abandoned = pending.len(), "{warning}");
                        warnings.push(warning);
                        LoopPhase::Exhausted(candidate)
                    } else {
                        debug!(round, pending = pending.len(), "awaiting pending actions");
                        LoopPhase::Awaiting { pending, started }
                    }
                }

                LoopPhase::Awaiting { pending, started } => {
                    let results = settle_all(pending).await;
                    let stats = RoundStatistics::new(round, results, started.elapsed());
                    let summary = stats.summary();
                    info!(
                        round,
                        resolved = summary.resolved,
                        rejected = summary.rejected,
                        duration_ms = summary.duration_ms,
                        "round settled"
                    );
                    store.dispatch_side(store_name, WaitAction::RecordStatistics(stats));
                    round += 1;
                    LoopPhase::Rendering
                }

                LoopPhase::Converged(result) => {
                    info!(renders = round, "render converged");
                    return ConvergenceReport {
                        run_id,
                        result,
                        status: ConvergenceStatus::Converged,
                        renders: round,
                        warnings,
                    };
                }

                LoopPhase::Exhausted(result) => {
                    return ConvergenceReport {
                        run_id,
                        result,
                        status: ConvergenceStatus::Exhausted,
                        renders: round,
                        warnings,
                    };
                }
            };
        }
    }
}

/// Converge `callback` against `store` once.
///
/// Shorthand for a [`ConvergenceLoop`] whose callback takes no arguments.
pub async fn converge<H, R, F>(mut callback: F, store: &mut H, config: ConvergenceConfig) -> R
where
    H: SideChannelHost,
    F: FnMut(&mut H) -> R,
{
    ConvergenceLoop::new(move |store: &mut H, _: &()| callback(store), config)
        .run(store, &())
        .await
}
