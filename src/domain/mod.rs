//! Domain layer for the convergence engine
//!
//! This module contains the core models and the ports the engine is written
//! against.

pub mod error;
pub mod models;
pub mod ports;

pub use error::{ConfigError, ConvergenceWarning};
