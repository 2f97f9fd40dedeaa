//! # president-engine
//!
//! Rules engine, opponent belief model and decision agents for the card
//! game President.
//!
//! ## Design Principles
//!
//! 1. **Rules Behind a Trait**: Search and agents drive the game through
//!    `RulesEngine` and never mutate state directly.
//!
//! 2. **Single Writer**: The probability model lives in the game state.
//!    Only the rules engine updates it; agents read it.
//!
//! 3. **Deterministic**: All randomness flows from seeded, forkable
//!    `GameRng`s. The same seed gives the same deal, the same rollouts and
//!    the same decisions, with or without parallel search.
//!
//! ## Architecture
//!
//! - **Legal-action generation** is the sole producer of actions. Applying
//!   an action that breaks the rules is a programming error and panics.
//!
//! - **Redeterminization**: Rollouts start from a copy of the state whose
//!   hidden hands are re-dealt from the acting player's beliefs.
//!
//! - **Persistent Data Structures**: Action history uses `im-rs` so rollout
//!   clones stay cheap.
//!
//! ## Modules
//!
//! - `core`: Players, per-player maps, RNG, action records
//! - `rules`: RulesEngine trait and finishing order
//! - `games`: President cards, parameters, state, rules and heuristic
//! - `belief`: Probability model and redeterminization
//! - `search`: Rollout configuration, simulation policies, statistics
//! - `agents`: Aggressive, protective, pragmatic and random players
//!
//! ## Example
//!
//! ```
//! use president_engine::{
//!     Agent, AggressiveAgent, PresidentGameBuilder, ProtectiveAgent, RandomAgent,
//! };
//!
//! let (game, mut state) = PresidentGameBuilder::new().player_count(3).build(7).unwrap();
//! let mut agents: Vec<Box<dyn Agent>> = vec![
//!     Box::new(AggressiveAgent),
//!     Box::new(ProtectiveAgent::new()),
//!     Box::new(RandomAgent::new(1)),
//! ];
//!
//! let result = game.play_game(&mut state, &mut agents, 1_000).unwrap();
//! assert_eq!(result.finish_order().len(), 3);
//! ```

pub mod agents;
pub mod belief;
pub mod core;
pub mod error;
pub mod games;
pub mod rules;
pub mod search;

// Re-export commonly used types
pub use crate::core::{ActionRecord, GameRng, PlayerId, PlayerMap};

pub use crate::error::{PresidentError, Result};

pub use crate::rules::{GameResult, RulesEngine};

pub use crate::games::president::{
    Action, Card, CardId, HeuristicWeights, PlayerResult, PresidentGame, PresidentGameBuilder,
    PresidentHeuristic, PresidentParams, PresidentState, RoundState,
};

pub use crate::belief::{determinize, Observation, ProbabilityModel};

pub use crate::search::{
    RandomSimulation, RolloutConfig, RolloutOutcome, SearchStats, SimulationPolicy,
};

pub use crate::agents::{
    Agent, AggressiveAgent, PragmaticAgent, ProtectiveAgent, RandomAgent,
};
