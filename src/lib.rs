//! Settle - render until dispatched async work has settled
//!
//! Settle lets a synchronous render pass over a unidirectional state store
//! wait for the asynchronous side effects it dispatches. A store enhancer
//! records every dispatched action that carries an async handle in a side
//! channel; a convergence loop re-renders, settling those handles between
//! passes, until a render dispatches nothing new or a round limit is hit.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): actions, async handles, side-channel models and ports
//! - **Service Layer** (`services`): host store, side-channel reducer, enhancer, outcome settling
//! - **Application Layer** (`application`): the convergence loop
//! - **Infrastructure Layer** (`infrastructure`): configuration loading and logging
//! - **CLI Layer** (`cli`): the `settle` demo binary
//!
//! # Example
//!
//! ```
//! use settle::{converge, Action, AsyncHandle, ConvergenceConfig, StateContainer, WaitEnhancer};
//!
//! #[derive(Debug, Clone)]
//! struct Fetch(AsyncHandle<String, String>);
//!
//! impl Action for Fetch {
//!     type Output = String;
//!     type Error = String;
//!     fn action_type(&self) -> &str { "FETCH" }
//!     fn async_payload(&self) -> Option<AsyncHandle<String, String>> { Some(self.0.clone()) }
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let mut store = WaitEnhancer::new().create_store(|fetches: &mut u32, _: &Fetch| *fetches += 1, 0);
//!
//! let page = converge(
//!     |store| {
//!         if *store.state() == 0 {
//!             store.dispatch(Fetch(AsyncHandle::resolved("body".to_string())));
//!         }
//!         format!("<p>{} fetch(es)</p>", store.state())
//!     },
//!     &mut store,
//!     ConvergenceConfig::default(),
//! )
//! .await;
//!
//! assert_eq!(page, "<p>1 fetch(es)</p>");
//! # });
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::{converge, ConvergenceLoop, ConvergenceReport, ConvergenceStatus};
pub use domain::models::{
    Action, AsyncHandle, Config, ConvergenceConfig, LiftedAction, LoggingConfig, Outcome,
    PendingEntry, RoundStatistics, RoundSummary, WaitAction, WaitState,
};
pub use domain::ports::{ActionClassifier, PayloadClassifier, Reducer, SideChannelHost, StateContainer};
pub use domain::{ConfigError, ConvergenceWarning};
pub use infrastructure::config::ConfigLoader;
pub use services::{ComposedState, Store, WaitEnhancer, WaitStore};
