//! Application layer: the convergence loop that drives render passes

pub mod convergence;

pub use convergence::{converge, ConvergenceLoop, ConvergenceReport, ConvergenceStatus};
