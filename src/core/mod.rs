//! Core engine types: players, RNG, action history.
//!
//! This module contains the building blocks that know nothing about the
//! rules of President.

pub mod action;
pub mod player;
pub mod rng;

pub use action::ActionRecord;
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
