//! Reducer trait for MVI architecture.

use super::intent::Intent;
use super::state::SliceState;

/// Reducer transforms state based on intents.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Intent) -> State
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: SliceState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// State used when the caller has none yet.
    fn initial(&self) -> Self::State;

    /// Process an intent and return the new state.
    ///
    /// Intents the reducer does not recognise return `state` unchanged.
    fn reduce(&self, state: Self::State, intent: &Self::Intent) -> Self::State;

    /// Like [`Reducer::reduce`], substituting [`Reducer::initial`] for a
    /// missing state.
    fn reduce_or_init(&self, state: Option<Self::State>, intent: &Self::Intent) -> Self::State {
        let state = state.unwrap_or_else(|| self.initial());
        self.reduce(state, intent)
    }
}
