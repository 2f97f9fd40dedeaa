//! Rollout search.
//!
//! ## Overview
//!
//! Flat Monte Carlo over a redeterminized state: every candidate action is
//! applied to independent re-deals of the hidden hands, played forward a
//! few random plies and scored by an evaluator. The `PragmaticAgent` drives
//! it; this module holds the pieces that do not depend on President.
//!
//! - `RolloutConfig`: rollout count, depth, parallelism and seed
//! - `SimulationPolicy`: how a single rollout plays forward
//! - `SearchStats`: counters for diagnostics

pub mod config;
pub mod policy;
pub mod stats;

pub use config::RolloutConfig;
pub use policy::{RandomSimulation, RolloutOutcome, SimulationPolicy};
pub use stats::SearchStats;
