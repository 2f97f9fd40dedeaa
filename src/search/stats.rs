//! Rollout search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics accumulated over an agent's decisions.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Decisions made.
    pub decisions: u32,

    /// Candidate actions scored.
    pub candidates: u32,

    /// Simulations (rollouts) performed.
    pub simulations: u32,

    /// Random plies played across all simulations.
    pub plies: u64,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate simulations per second.
    #[must_use]
    pub fn simulations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.simulations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Average plies played per simulation.
    #[must_use]
    pub fn avg_plies_per_simulation(&self) -> f64 {
        if self.simulations == 0 {
            0.0
        } else {
            self.plies as f64 / self.simulations as f64
        }
    }
}
