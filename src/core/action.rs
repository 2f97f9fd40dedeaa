//! Action history records.
//!
//! Every applied action is logged with the seat that took it and its
//! position in the game, so hosts and tests can audit how a state was reached.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord<A> {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: A,

    /// Turn number when the action was taken (starts at 1).
    pub turn: u32,

    /// Sequence number within the turn. Non-zero only for the extra
    /// actions a player takes in the same turn.
    pub sequence: u32,
}

impl<A> ActionRecord<A> {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: A, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
