//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces the convergence engine is written against:
//! - StateContainer / Reducer: the host state container being enhanced
//! - ActionClassifier: detection of actions that carry asynchronous work
//! - SideChannelHost: access to the bookkeeping store the loop drains
//!
//! Keeping these as traits lets the engine wrap any host container and lets
//! callers swap the classification strategy.

pub mod classifier;
pub mod side_channel;
pub mod state_container;

pub use classifier::{ActionClassifier, PayloadClassifier};
pub use side_channel::SideChannelHost;
pub use state_container::{Reducer, StateContainer};
