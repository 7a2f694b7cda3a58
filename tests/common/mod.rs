//! Common test utilities for integration tests
//!
//! Provides a small job-queue host application used across the integration
//! test files.

#![allow(dead_code)]

use std::time::Duration;

use settle::{Action, AsyncHandle, WaitEnhancer, WaitStore};

/// Action type of the test host application
#[derive(Debug, Clone)]
pub enum Job {
    /// Purely synchronous bookkeeping
    Note(u32),

    /// Starts async work identified by `id`
    Run {
        id: u32,
        handle: AsyncHandle<u32, String>,
    },
}

impl Action for Job {
    type Output = u32;
    type Error = String;

    fn action_type(&self) -> &str {
        match self {
            Self::Note(_) => "NOTE",
            Self::Run { .. } => "RUN",
        }
    }

    fn async_payload(&self) -> Option<AsyncHandle<u32, String>> {
        match self {
            Self::Note(_) => None,
            Self::Run { handle, .. } => Some(handle.clone()),
        }
    }
}

impl Job {
    pub fn id(&self) -> u32 {
        match self {
            Self::Note(id) | Self::Run { id, .. } => *id,
        }
    }
}

/// Host state: ids of every dispatched job, in order
pub type JobLog = Vec<u32>;

pub type JobStore = WaitStore<JobLog, Job>;

pub fn job_reducer(log: &mut JobLog, job: &Job) {
    log.push(job.id());
}

/// A wait-enhanced store with an empty job log
pub fn job_store() -> JobStore {
    WaitEnhancer::new().create_store(job_reducer, JobLog::new())
}

/// A job whose work succeeds immediately with `value`
pub fn resolving(id: u32, value: u32) -> Job {
    Job::Run {
        id,
        handle: AsyncHandle::resolved(value),
    }
}

/// A job whose work fails immediately with `error`
pub fn rejecting(id: u32, error: &str) -> Job {
    Job::Run {
        id,
        handle: AsyncHandle::rejected(error.to_string()),
    }
}

/// A job whose work succeeds with `value` after `ms` milliseconds
pub fn delayed(id: u32, value: u32, ms: u64) -> Job {
    Job::Run {
        id,
        handle: AsyncHandle::new(async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            Ok(value)
        }),
    }
}

/// Setup test logging
///
/// Initializes a tracing subscriber for test output.
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
