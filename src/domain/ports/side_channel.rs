use crate::domain::models::{Action, WaitAction, WaitState};

/// Port for stores that may carry a named side channel.
///
/// The convergence loop only talks to a store through this trait. A store
/// that was not built by the wait enhancer, or that registered its side
/// channel under another name, answers `None` / `false` and the loop degrades
/// to a single render.
pub trait SideChannelHost {
    /// Host action type the side channel records
    type Action: Action;

    /// Side-channel state registered under `name`.
    fn side_channel(&self, name: &str) -> Option<&WaitState<Self::Action>>;

    /// Dispatch `action` to the side channel registered under `name`.
    ///
    /// Returns `false` when there is no such side channel.
    fn dispatch_side(&mut self, name: &str, action: WaitAction<Self::Action>) -> bool;
}
