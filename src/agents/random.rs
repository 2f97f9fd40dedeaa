use super::Agent;
use crate::core::GameRng;
use crate::games::president::{Action, PresidentGame, PresidentState};

/// Uniform choice over legal actions. A baseline opponent.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose(&mut self, _game: &PresidentGame, _state: &PresidentState, actions: &[Action]) -> Action {
        assert!(!actions.is_empty(), "No legal actions to choose from");
        actions[self.rng.gen_range_usize(0..actions.len())]
    }
}
