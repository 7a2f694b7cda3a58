//! Service layer: host store, side channel, enhancer and outcome settling

pub mod enhancer;
pub mod outcome;
pub mod store;
pub mod wait_reducer;

pub use enhancer::{lift_dispatch, lift_reducer, ComposedState, WaitEnhancer, WaitStore};
pub use outcome::{settle_all, settle_entry};
pub use store::Store;
