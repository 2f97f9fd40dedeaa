use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use super::Agent;
use crate::belief::determinize;
use crate::core::GameRng;
use crate::games::president::{Action, PresidentGame, PresidentHeuristic, PresidentState};
use crate::rules::RulesEngine;
use crate::search::{RandomSimulation, RolloutConfig, RolloutOutcome, SearchStats, SimulationPolicy};

/// Rollout search over redeterminized deals.
///
/// For every legal play it runs `rollout_count` simulations. Each one
/// re-deals the hidden hands from the acting player's beliefs, applies the
/// play, runs `rollout_depth` random plies and scores the result with the
/// heuristic. The play with the best average wins; ties go to the first.
///
/// Every simulation gets an RNG forked up front in a fixed order, so the
/// choice for a given seed does not depend on `parallel`.
pub struct PragmaticAgent {
    config: RolloutConfig,
    heuristic: PresidentHeuristic,
    simulation: Box<dyn SimulationPolicy<PresidentGame>>,
    rng: GameRng,
    stats: SearchStats,
}

impl PragmaticAgent {
    pub fn new(config: RolloutConfig) -> Self {
        Self {
            rng: GameRng::new(config.seed),
            config,
            heuristic: PresidentHeuristic::default(),
            simulation: Box::new(RandomSimulation),
            stats: SearchStats::new(),
        }
    }

    /// Use a custom evaluator.
    pub fn with_heuristic(mut self, heuristic: PresidentHeuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Use a custom simulation policy.
    pub fn with_simulation<S: SimulationPolicy<PresidentGame> + 'static>(mut self, policy: S) -> Self {
        self.simulation = Box::new(policy);
        self
    }

    #[must_use]
    pub fn config(&self) -> &RolloutConfig {
        &self.config
    }

    /// Statistics accumulated since creation.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Average rollout score of every candidate, in candidate order.
    pub fn evaluate_candidates(
        &mut self,
        game: &PresidentGame,
        state: &PresidentState,
        candidates: &[Action],
    ) -> Vec<f64> {
        let actor = state.current_player();
        let count = self.config.rollout_count.max(1) as usize;

        let mut jobs: Vec<(usize, GameRng)> = Vec::with_capacity(candidates.len() * count);
        for index in 0..candidates.len() {
            for _ in 0..count {
                jobs.push((index, self.rng.fork()));
            }
        }

        let heuristic = self.heuristic;
        let depth = self.config.rollout_depth;
        let simulation = &*self.simulation;
        let run = |(index, mut rng): (usize, GameRng)| -> RolloutOutcome {
            let mut sim = determinize(state, actor, &mut rng);
            game.apply_action(&mut sim, &candidates[index]);
            simulation.simulate(game, &mut sim, &mut rng, depth, &|s: &PresidentState| {
                heuristic.evaluate(s, actor)
            })
        };

        let outcomes: Vec<RolloutOutcome> = if self.config.parallel {
            jobs.into_par_iter().map(run).collect()
        } else {
            jobs.into_iter().map(run).collect()
        };

        let mut totals = vec![0.0; candidates.len()];
        for (i, outcome) in outcomes.iter().enumerate() {
            totals[i / count] += outcome.score;
            self.stats.plies += u64::from(outcome.plies);
        }
        self.stats.candidates += candidates.len() as u32;
        self.stats.simulations += outcomes.len() as u32;

        totals.into_iter().map(|t| t / count as f64).collect()
    }
}

impl Default for PragmaticAgent {
    fn default() -> Self {
        Self::new(RolloutConfig::default())
    }
}

impl std::fmt::Debug for PragmaticAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PragmaticAgent")
            .field("config", &self.config)
            .field("heuristic", &self.heuristic)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Agent for PragmaticAgent {
    fn name(&self) -> &'static str {
        "pragmatic"
    }

    fn choose(&mut self, game: &PresidentGame, state: &PresidentState, actions: &[Action]) -> Action {
        assert!(!actions.is_empty(), "No legal actions to choose from");

        let candidates: Vec<Action> = actions.iter().copied().filter(|a| !a.is_pass()).collect();
        match candidates.len() {
            0 => return Action::Pass,
            1 => return candidates[0],
            _ => {}
        }

        let start = Instant::now();
        let scores = self.evaluate_candidates(game, state, &candidates);

        let mut best = 0;
        for (i, &score) in scores.iter().enumerate() {
            if score > scores[best] {
                best = i;
            }
        }

        self.stats.decisions += 1;
        self.stats.time_us += start.elapsed().as_micros() as u64;
        debug!(
            agent = self.name(),
            action = %candidates[best],
            score = scores[best],
            candidates = candidates.len(),
            "chose action"
        );
        candidates[best]
    }
}
