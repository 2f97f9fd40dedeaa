use smallvec::SmallVec;
use tracing::debug;

use super::{win_probability, Agent};
use crate::games::president::{Action, PresidentGame, PresidentState};

/// Plays cheap when it is safe, strong when nothing is.
///
/// Among plays whose win probability reaches the threshold it picks the
/// lowest value. If none do, it takes the play with the highest win
/// probability. It passes only when no play exists.
#[derive(Clone, Copy, Debug)]
pub struct ProtectiveAgent {
    threshold: f64,
}

impl ProtectiveAgent {
    /// Default win probability a play needs to count as safe.
    pub const SAFE_THRESHOLD: f64 = 0.20;

    pub fn new() -> Self {
        Self {
            threshold: Self::SAFE_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for ProtectiveAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for ProtectiveAgent {
    fn name(&self) -> &'static str {
        "protective"
    }

    fn choose(&mut self, _game: &PresidentGame, state: &PresidentState, actions: &[Action]) -> Action {
        assert!(!actions.is_empty(), "No legal actions to choose from");

        // (action, value, win probability) for every play
        let scored: SmallVec<[(Action, u8, f64); 16]> = actions
            .iter()
            .filter_map(|a| Some((*a, a.value()?, win_probability(state, a)?)))
            .collect();

        let safe = scored
            .iter()
            .filter(|(_, _, p)| *p >= self.threshold)
            .min_by_key(|(_, v, _)| *v);

        let strongest = || {
            scored.iter().fold(None, |best: Option<&(Action, u8, f64)>, s| match best {
                Some(b) if s.2 <= b.2 => Some(b),
                _ => Some(s),
            })
        };

        let lowest = || scored.iter().min_by_key(|(_, v, _)| *v);

        match safe.or_else(strongest).or_else(lowest) {
            Some(&(action, _, p_win)) => {
                debug!(
                    agent = self.name(),
                    %action,
                    p_win,
                    safe = p_win >= self.threshold,
                    "chose action"
                );
                action
            }
            None => actions
                .iter()
                .copied()
                .find(Action::is_pass)
                .unwrap_or(actions[0]),
        }
    }
}
