//! President actions: pass, play one card, play a pair.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::card::Card;
use super::state::PresidentState;
use crate::belief::Observation;
use crate::core::PlayerId;

/// A single move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Decline to play this round.
    Pass,

    /// Play one card.
    PlayOne { card: Card },

    /// Play two distinct cards of the same value.
    PlayPair { first: Card, second: Card, value: u8 },
}

impl Action {
    #[must_use]
    pub fn one(card: Card) -> Self {
        Action::PlayOne { card }
    }

    /// Pair two cards. Panics if they differ in value or are the same card.
    #[must_use]
    pub fn pair(first: Card, second: Card) -> Self {
        assert_eq!(
            first.value, second.value,
            "A pair needs two cards of the same value"
        );
        assert_ne!(first.id, second.id, "A pair needs two distinct cards");
        Action::PlayPair {
            first,
            second,
            value: first.value,
        }
    }

    /// Value played, `None` for a pass.
    #[must_use]
    pub fn value(&self) -> Option<u8> {
        match self {
            Action::Pass => None,
            Action::PlayOne { card } => Some(card.value),
            Action::PlayPair { value, .. } => Some(*value),
        }
    }

    #[must_use]
    pub fn card_count(&self) -> u8 {
        match self {
            Action::Pass => 0,
            Action::PlayOne { .. } => 1,
            Action::PlayPair { .. } => 2,
        }
    }

    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Action::Pass)
    }

    #[must_use]
    pub fn cards(&self) -> SmallVec<[Card; 2]> {
        match self {
            Action::Pass => SmallVec::new(),
            Action::PlayOne { card } => smallvec![*card],
            Action::PlayPair { first, second, .. } => smallvec![*first, *second],
        }
    }

    /// What the table learns from this action. `current_value` is the pile
    /// value before the action.
    #[must_use]
    pub fn observation(&self, current_value: u8) -> Observation {
        match self {
            Action::Pass => Observation::Passed { current_value },
            Action::PlayOne { card } => Observation::Played {
                value: card.value,
                count: 1,
            },
            Action::PlayPair { value, .. } => Observation::Played {
                value: *value,
                count: 2,
            },
        }
    }

    /// Mutate piles and round constraint only. Turn order, finishing and
    /// beliefs belong to the rules engine.
    pub fn apply(&self, state: &mut PresidentState, player: PlayerId) {
        match self {
            Action::Pass => state.register_pass(player),
            _ => state.play_cards(player, &self.cards()),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Pass => write!(f, "pass"),
            Action::PlayOne { card } => write!(f, "one {}", card.value),
            Action::PlayPair { value, .. } => write!(f, "double {value}"),
        }
    }
}
