//! Rules engine trait for game implementations.
//!
//! Games implement `RulesEngine` to define:
//! - Legal actions for each game state
//! - How actions modify state
//! - Finishing order once the game is over
//!
//! Rollout search and agents call into `RulesEngine` and never interpret
//! game-specific state directly.

pub mod engine;

pub use engine::{GameResult, RulesEngine};
