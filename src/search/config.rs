//! Rollout search configuration.

use serde::{Deserialize, Serialize};

/// Rollout search parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RolloutConfig {
    /// Simulations per candidate action (default: 5).
    pub rollout_count: u32,

    /// Random plies played after the candidate (default: 3).
    /// The state is scored once this many plies ran or the game ended.
    pub rollout_depth: u32,

    /// Run simulations on the rayon thread pool (default: true).
    /// Results are identical either way for the same seed.
    pub parallel: bool,

    /// Seed for the agent's RNG (default: 42).
    pub seed: u64,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            rollout_count: 5,
            rollout_depth: 3,
            parallel: true,
            seed: 42,
        }
    }
}

impl RolloutConfig {
    pub fn with_rollout_count(mut self, count: u32) -> Self {
        self.rollout_count = count;
        self
    }

    pub fn with_rollout_depth(mut self, depth: u32) -> Self {
        self.rollout_depth = depth;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
