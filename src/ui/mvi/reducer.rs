//! Reducer trait.

use super::intent::Intent;
use super::state::UiState;

/// The only place a feature's state changes.
///
/// Must be pure: (State, Intent) -> State. Anything with side effects
/// (spawning tasks, writing files) happens in the caller around the
/// dispatch.
pub trait Reducer {
    type State: UiState;

    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
