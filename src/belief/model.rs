//! Opponent-hand probability model.
//!
//! Tracks a global count of unseen copies per value plus, for every player,
//! a belief distribution over the values they may hold. The rules engine
//! updates it after every action; agents only read it.
//!
//! ## Known approximation
//!
//! This is not an exact posterior. Counts are global rather than per
//! opponent, and every update reweights every row (the actor's included)
//! by the remaining counts, which double-counts scarcity across players.
//! It is cheap to maintain incrementally and good enough to steer agents.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap};
use crate::games::president::Card;

/// Lower bound on per-value weight, so no value locks at zero through
/// scarcity alone.
pub const PROBABILITY_FLOOR: f64 = 1e-6;

/// What the table saw a player do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Observation {
    /// `count` cards of `value` went to the pile.
    Played { value: u8, count: u8 },

    /// The player passed on a pile of `current_value`.
    Passed { current_value: u8 },
}

/// Belief rows per player over values `1..=max_value`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityModel {
    max_value: u8,

    /// Unseen copies per value. Index 0 is unused.
    remaining: Vec<u32>,

    /// Rows indexed by value. Index 0 is unused and stays 0.
    beliefs: PlayerMap<Vec<f64>>,
}

impl ProbabilityModel {
    /// Seed every value in `1..=max_value` with `copies_per_value` unseen
    /// copies, minus the cards already `seen`.
    pub fn new<'a>(
        player_count: usize,
        max_value: u8,
        copies_per_value: u8,
        seen: impl IntoIterator<Item = &'a Card>,
    ) -> Self {
        let mut remaining = vec![u32::from(copies_per_value); usize::from(max_value) + 1];
        remaining[0] = 0;
        for card in seen {
            if let Some(count) = remaining.get_mut(usize::from(card.value)) {
                *count = count.saturating_sub(1);
            }
        }

        let prior = prior_row(&remaining, max_value);
        Self {
            max_value,
            remaining,
            beliefs: PlayerMap::with_value(player_count, prior),
        }
    }

    /// Fold an observed action into the model.
    pub fn update(&mut self, player: PlayerId, observation: Observation) {
        let max = usize::from(self.max_value);

        match observation {
            Observation::Played { value, count } => {
                let v = usize::from(value);
                if (1..=max).contains(&v) {
                    let before = self.remaining[v];
                    let after = before.saturating_sub(u32::from(count));
                    self.remaining[v] = after;

                    let factor = if before == 0 {
                        0.0
                    } else {
                        f64::from(after) / f64::from(before)
                    };
                    self.beliefs[player][v] *= factor;
                }
            }
            Observation::Passed { current_value } => {
                // A legal pass proves nothing above the pile was held
                let limit = current_value.min(self.max_value);
                let row = &mut self.beliefs[player];
                for p in &mut row[usize::from(limit) + 1..=max] {
                    *p = 0.0;
                }
                if !normalize(row) {
                    *row = prior_row(&self.remaining, limit);
                }
            }
        }

        let remaining = &self.remaining;
        let max_value = self.max_value;
        for (_, row) in self.beliefs.iter_mut() {
            for (p, &count) in row.iter_mut().zip(remaining).skip(1) {
                *p *= f64::from(count).max(PROBABILITY_FLOOR);
            }
            if !normalize(row) {
                *row = prior_row(remaining, max_value);
            }
        }
    }

    #[must_use]
    pub fn max_value(&self) -> u8 {
        self.max_value
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.beliefs.player_count()
    }

    /// Unseen copies of `value`; 0 outside `1..=max_value`.
    #[must_use]
    pub fn remaining(&self, value: u8) -> u32 {
        if value == 0 {
            return 0;
        }
        self.remaining.get(usize::from(value)).copied().unwrap_or(0)
    }

    /// Unseen copies over all values.
    #[must_use]
    pub fn total_remaining(&self) -> u32 {
        self.remaining.iter().sum()
    }

    /// Probability that `player` holds `value`.
    #[must_use]
    pub fn belief(&self, player: PlayerId, value: u8) -> f64 {
        if value == 0 {
            return 0.0;
        }
        self.beliefs[player]
            .get(usize::from(value))
            .copied()
            .unwrap_or(0.0)
    }

    /// A player's row for values `1..=max_value`.
    #[must_use]
    pub fn row(&self, player: PlayerId) -> &[f64] {
        &self.beliefs[player][1..]
    }

    /// Belief mass a player places strictly above `value`.
    #[must_use]
    pub fn probability_higher(&self, player: PlayerId, value: u8) -> f64 {
        self.beliefs[player]
            .iter()
            .skip(usize::from(value) + 1)
            .sum()
    }

    /// Chance that no opponent of `actor` can beat `value`:
    /// the product over opponents of one minus their mass above `value`.
    #[must_use]
    pub fn win_probability(&self, actor: PlayerId, value: u8) -> f64 {
        self.beliefs
            .player_ids()
            .filter(|&p| p != actor)
            .map(|p| (1.0 - self.probability_higher(p, value)).clamp(0.0, 1.0))
            .product()
    }
}

/// Count-weighted distribution over `1..=limit` with the floor applied.
/// An empty limit widens to every value.
fn prior_row(remaining: &[u32], limit: u8) -> Vec<f64> {
    let max = remaining.len() - 1;
    let limit = match usize::from(limit) {
        0 => max,
        l => l.min(max),
    };

    let mut row = vec![0.0; remaining.len()];
    for v in 1..=limit {
        row[v] = f64::from(remaining[v]).max(PROBABILITY_FLOOR);
    }
    normalize(&mut row);
    row
}

/// Scale the row to sum 1. Returns false, leaving it untouched, when it has
/// no usable mass.
fn normalize(row: &mut [f64]) -> bool {
    let total: f64 = row.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return false;
    }
    for p in row.iter_mut() {
        *p /= total;
    }
    true
}
