//! Configuration errors.
//!
//! Only setup can fail. Rule violations during play (acting with a card
//! that is not held, a play that does not beat the pile) are programming
//! errors and panic, because `legal_actions` is the only producer of actions.

use thiserror::Error;

/// Errors raised while configuring or setting up a game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresidentError {
    #[error("unsupported player count {0}: President is played by 2 to 4 players")]
    UnsupportedPlayerCount(usize),

    #[error("invalid card value range {min}..={max}")]
    InvalidValueRange { min: u8, max: u8 },

    #[error("copies per value must be at least 1")]
    NoCopies,

    #[error("card value {value} is outside the configured range {min}..={max}")]
    ValueOutOfRange { value: u8, min: u8, max: u8 },

    #[error("player {player} is not seated at a {player_count}-player table")]
    UnknownPlayer { player: u8, player_count: usize },

    #[error("a pile of {count} card(s) of value {value} cannot be the active play")]
    InvalidPile { value: u8, count: u8 },
}

pub type Result<T> = std::result::Result<T, PresidentError>;
