//! Game parameters.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{PresidentError, Result};

/// Values `min_card_value` may be tuned to.
pub const MIN_CARD_VALUE_OPTIONS: [u8; 3] = [2, 3, 4];

/// Values `max_card_value` may be tuned to.
pub const MAX_CARD_VALUE_OPTIONS: [u8; 3] = [10, 11, 12];

/// Table sizes the rules and the evaluator support.
pub const SUPPORTED_PLAYER_COUNTS: RangeInclusive<usize> = 2..=4;

/// President deck parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PresidentParams {
    /// Lowest card value in the deck (default: 2).
    pub min_card_value: u8,

    /// Highest card value in the deck (default: 10).
    /// Playing this value is a bomb.
    pub max_card_value: u8,

    /// Copies of each value (default: 2).
    pub copies_per_value: u8,
}

impl Default for PresidentParams {
    fn default() -> Self {
        Self {
            min_card_value: 2,
            max_card_value: 10,
            copies_per_value: 2,
        }
    }
}

impl PresidentParams {
    pub fn with_min_card_value(mut self, value: u8) -> Self {
        self.min_card_value = value;
        self
    }

    pub fn with_max_card_value(mut self, value: u8) -> Self {
        self.max_card_value = value;
        self
    }

    pub fn with_copies_per_value(mut self, copies: u8) -> Self {
        self.copies_per_value = copies;
        self
    }

    /// Check the value range and copy count.
    pub fn validate(&self) -> Result<()> {
        if self.min_card_value == 0 || self.min_card_value > self.max_card_value {
            return Err(PresidentError::InvalidValueRange {
                min: self.min_card_value,
                max: self.max_card_value,
            });
        }
        if self.copies_per_value == 0 {
            return Err(PresidentError::NoCopies);
        }
        Ok(())
    }

    /// Check that a table size is supported.
    pub fn validate_player_count(player_count: usize) -> Result<()> {
        if SUPPORTED_PLAYER_COUNTS.contains(&player_count) {
            Ok(())
        } else {
            Err(PresidentError::UnsupportedPlayerCount(player_count))
        }
    }

    /// Check that a card value exists in this deck.
    pub fn validate_value(&self, value: u8) -> Result<()> {
        if self.values().contains(&value) {
            Ok(())
        } else {
            Err(PresidentError::ValueOutOfRange {
                value,
                min: self.min_card_value,
                max: self.max_card_value,
            })
        }
    }

    /// All card values in the deck, lowest first.
    #[must_use]
    pub fn values(&self) -> RangeInclusive<u8> {
        self.min_card_value..=self.max_card_value
    }

    /// Total number of cards in the deck.
    #[must_use]
    pub fn n_number_cards(&self) -> usize {
        self.copies_per_value as usize * self.values().count()
    }

    /// True if playing `value` clears the pile.
    #[must_use]
    pub fn is_bomb(&self, value: u8) -> bool {
        value == self.max_card_value
    }

    /// Normalizer for hand-size signals. Zero for unsupported table sizes.
    #[must_use]
    pub fn max_cards_per_player(&self, player_count: usize) -> usize {
        let total = self.n_number_cards();
        match player_count {
            2 => total / 2,
            3 => (total as f64 / 3.0).round() as usize,
            4 => total / 4,
            _ => 0,
        }
    }
}
