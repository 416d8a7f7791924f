//! The reducer contract shared by every engine.

use super::state::State;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A pure `(state, event) -> state` function plus its phase projection.
///
/// Reducers never fail: events that make no sense in the current state
/// return an equal state. Hosts detect that by comparison.
pub trait Reducer {
    /// The full engine state. Plain data, serializable, comparable.
    type State: Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync;

    /// Input accepted by the reducer.
    type Event: Debug;

    /// Coarse summary of a state, recorded in session history.
    type Phase: State;

    /// Fresh state for a new interaction.
    fn initial(&self) -> Self::State;

    /// Apply one event.
    fn reduce(&self, state: &Self::State, event: Self::Event) -> Self::State;

    /// Project a state onto its phase.
    fn phase(&self, state: &Self::State) -> Self::Phase;
}
