//! Domain models for the convergence engine

pub mod action;
pub mod config;
pub mod outcome;
pub mod wait;

pub use action::{Action, AsyncHandle};
pub use config::{
    Config, ConvergenceConfig, LoggingConfig, DEFAULT_STORE_NAME, MIN_USEFUL_ROUND_LIMIT,
};
pub use outcome::{Outcome, PendingEntry, RoundStatistics, RoundSummary};
pub use wait::{LiftedAction, WaitAction, WaitState};
