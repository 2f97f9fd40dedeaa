//! President: a shedding game for 2 to 4 players.
//!
//! - Players race to empty their hands
//! - A play is one card or a pair that strictly beats the pile
//! - The opener fixes whether singles or pairs follow
//! - Playing the highest value is a bomb: the pile clears and the same
//!   player goes again
//! - When every active player passes in a row the pile clears
//! - The game ends when a single player still holds cards

mod action;
mod card;
mod game;
mod heuristic;
mod params;
mod state;

pub use action::Action;
pub use card::{Card, CardId};
pub use game::{PresidentGame, PresidentGameBuilder};
pub use heuristic::{HeuristicWeights, PresidentHeuristic};
pub use params::{
    PresidentParams, MAX_CARD_VALUE_OPTIONS, MIN_CARD_VALUE_OPTIONS, SUPPORTED_PLAYER_COUNTS,
};
pub use state::{PlayerResult, PresidentState, RoundState};
