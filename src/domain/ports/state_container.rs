/// Transition function of a state container.
///
/// Applies one action to the state in place. Reducers must not perform side
/// effects; asynchronous work is represented by handles carried on actions.
///
/// Any `Fn(&mut S, &A)` is a reducer:
///
/// ```
/// use settle::domain::ports::Reducer;
///
/// let counter = |state: &mut u32, step: &u32| *state += step;
/// let mut state = 1;
/// counter.reduce(&mut state, &2);
/// assert_eq!(state, 3);
/// ```
pub trait Reducer<S, A> {
    fn reduce(&self, state: &mut S, action: &A);
}

impl<S, A, F> Reducer<S, A> for F
where
    F: Fn(&mut S, &A),
{
    fn reduce(&self, state: &mut S, action: &A) {
        self(state, action);
    }
}

/// Port for a unidirectional-data-flow state container
///
/// Defines the host contract the wait enhancer wraps:
/// - `dispatch` routes an action through the reducer and hands the same
///   action back to the caller
/// - `state` reads the current state
pub trait StateContainer {
    /// State held by the container
    type State;

    /// Action type accepted by `dispatch`
    type Action;

    /// Apply `action` synchronously and return it unchanged.
    fn dispatch(&mut self, action: Self::Action) -> Self::Action;

    /// Current state.
    fn state(&self) -> &Self::State;
}
