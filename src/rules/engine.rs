//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define their rules:
//! - What actions are legal
//! - How actions modify state
//! - When the game is over and in which finishing order

use crate::core::player::PlayerId;

/// Result of a completed game: seats in the order they finished.
///
/// The first entry is the winner. The last entry is the seat that was
/// still holding cards when the game ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameResult {
    finish_order: Vec<PlayerId>,
}

impl GameResult {
    #[must_use]
    pub fn new(finish_order: Vec<PlayerId>) -> Self {
        assert!(!finish_order.is_empty(), "A finished game has at least one player");
        Self { finish_order }
    }

    /// Seats from first to last.
    #[must_use]
    pub fn finish_order(&self) -> &[PlayerId] {
        &self.finish_order
    }

    #[must_use]
    pub fn winner(&self) -> PlayerId {
        self.finish_order[0]
    }

    #[must_use]
    pub fn loser(&self) -> PlayerId {
        self.finish_order[self.finish_order.len() - 1]
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner() == player
    }

    /// 1-based finishing place of a player, if they took part.
    #[must_use]
    pub fn place(&self, player: PlayerId) -> Option<usize> {
        self.finish_order
            .iter()
            .position(|&p| p == player)
            .map(|i| i + 1)
    }
}

/// Rules engine trait.
///
/// The engine calls these methods during play and rollouts.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Never empty while the game is running; a forced
///   pass is still an action
/// - `apply_action`: Must be deterministic given the state (randomness
///   lives in the state's own RNG)
/// - `is_terminal`: Return None if the game continues
pub trait RulesEngine {
    /// Full game state.
    type State;

    /// One executable move.
    type Action: Clone;

    /// Seat that acts next.
    fn active_player(&self, state: &Self::State) -> PlayerId;

    /// Enumerate the legal actions of the active player.
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Apply an action taken by the active player, including every
    /// consequence (bookkeeping, end of game, turn hand-off).
    fn apply_action(&self, state: &mut Self::State, action: &Self::Action);

    /// Check if the game is over.
    ///
    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn is_terminal(&self, state: &Self::State) -> Option<GameResult>;
}
