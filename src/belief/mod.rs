//! Hidden-information modelling.
//!
//! - `ProbabilityModel`: per-player belief rows over card values, updated
//!   from observed plays and passes
//! - `determinize`: sample a concrete deal of the hidden hands consistent
//!   with those beliefs, as a starting point for rollouts

pub mod determinize;
pub mod model;

pub use determinize::determinize;
pub use model::{Observation, ProbabilityModel, PROBABILITY_FLOOR};
