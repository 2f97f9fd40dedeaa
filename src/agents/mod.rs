//! Decision agents.
//!
//! Every agent receives the state and the legal actions computed by the
//! rules engine and returns exactly one of those actions. The list is never
//! empty while the game runs; a forced pass is still an action.
//!
//! | Agent | Policy |
//! |-------|--------|
//! | `AggressiveAgent` | Play the value least likely to be beaten |
//! | `ProtectiveAgent` | Play the cheapest value that is safe enough |
//! | `PragmaticAgent` | Rollout search over redeterminized deals |
//! | `RandomAgent` | Uniform over legal actions |

mod aggressive;
mod pragmatic;
mod protective;
mod random;

pub use aggressive::AggressiveAgent;
pub use pragmatic::PragmaticAgent;
pub use protective::ProtectiveAgent;
pub use random::RandomAgent;

use crate::games::president::{Action, PresidentGame, PresidentState};

/// A player policy.
pub trait Agent: Send {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Pick one of `actions` for the current player.
    fn choose(&mut self, game: &PresidentGame, state: &PresidentState, actions: &[Action]) -> Action;
}

/// Chance that no opponent beats the action, from the acting player's
/// point of view. `None` for a pass.
#[must_use]
pub fn win_probability(state: &PresidentState, action: &Action) -> Option<f64> {
    action
        .value()
        .map(|value| state.beliefs().win_probability(state.current_player(), value))
}
