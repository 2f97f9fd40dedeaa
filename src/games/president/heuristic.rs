//! Heuristic state evaluation.
//!
//! Scores a position for one player as a weighted sum of six normalized
//! signals. Used to score rollout leaves and as a terminal estimate.

use serde::{Deserialize, Serialize};

use super::state::{PlayerResult, PresidentState};
use crate::core::PlayerId;

/// Signal weights.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    /// Fewer cards left in hand (default: 1.0).
    pub few_cards: f64,

    /// Higher average held value (default: 0.5).
    pub high_cards: f64,

    /// Next player still holding many cards (default: 0.2).
    pub next_player: f64,

    /// Smaller hand than the average opponent (default: 0.3).
    pub relative_advantage: f64,

    /// Share of the hand that is currently playable (default: 0.3).
    pub flexibility: f64,

    /// Playable pairs held (default: 0.7).
    pub combo: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            few_cards: 1.0,
            high_cards: 0.5,
            next_player: 0.2,
            relative_advantage: 0.3,
            flexibility: 0.3,
            combo: 0.7,
        }
    }
}

impl HeuristicWeights {
    #[must_use]
    fn as_array(&self) -> [f64; 6] {
        [
            self.few_cards,
            self.high_cards,
            self.next_player,
            self.relative_advantage,
            self.flexibility,
            self.combo,
        ]
    }
}

/// Weighted-signal evaluator.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PresidentHeuristic {
    pub weights: HeuristicWeights,
}

impl PresidentHeuristic {
    #[must_use]
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    /// Score the state for `player`: -1 once they lost, +1 once they won,
    /// the weighted signal sum otherwise.
    #[must_use]
    pub fn evaluate(&self, state: &PresidentState, player: PlayerId) -> f64 {
        match state.result(player) {
            PlayerResult::Loss => -1.0,
            PlayerResult::Win => 1.0,
            PlayerResult::Ongoing | PlayerResult::Draw => self
                .weights
                .as_array()
                .iter()
                .zip(Self::signals(state, player))
                .map(|(w, s)| w * s)
                .sum(),
        }
    }

    /// The six unweighted signals, in weight order.
    ///
    /// Hand-size signals are 0 for table sizes without a per-player card
    /// normalizer. Flexibility and combo are 0 while the next player holds
    /// no cards.
    #[must_use]
    pub fn signals(state: &PresidentState, player: PlayerId) -> [f64; 6] {
        let max_cards = state.params().max_cards_per_player(state.player_count()) as f64;
        let per_max = |x: f64| if max_cards > 0.0 { x / max_cards } else { 0.0 };

        let own = state.hand(player).len() as f64;
        let next = state.hand(state.next_player()).len() as f64;
        let per_next = |x: f64| if next > 0.0 { x / next } else { 0.0 };

        [
            per_max(max_cards - own),
            state.average_card_value(player) / f64::from(state.params().max_card_value),
            per_max(next),
            per_max(state.average_opponent_hand_size(player) - own),
            per_next(state.playable_count(player) as f64),
            per_next(state.combo_count(player) as f64),
        ]
    }
}
