//! Rollout policies.
//!
//! A `SimulationPolicy` plays a cloned state forward for a bounded number of
//! plies and scores where it ends up. Scoring is injected by the caller, so
//! the same policy serves any evaluator.

use crate::core::GameRng;
use crate::rules::RulesEngine;

/// Result of one simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RolloutOutcome {
    /// Evaluator score of the final state.
    pub score: f64,

    /// Plies actually played before stopping.
    pub plies: u32,
}

/// Policy for running simulations (rollouts) from a state.
pub trait SimulationPolicy<E: RulesEngine>: Send + Sync {
    /// Play up to `max_depth` plies, stopping early at a terminal state,
    /// then score the state with `evaluate`.
    ///
    /// The state is modified during simulation.
    fn simulate(
        &self,
        engine: &E,
        state: &mut E::State,
        rng: &mut GameRng,
        max_depth: u32,
        evaluate: &dyn Fn(&E::State) -> f64,
    ) -> RolloutOutcome;
}

/// Random simulation policy.
///
/// Plays uniformly random legal actions until terminal or depth limit.
#[derive(Clone, Debug, Default)]
pub struct RandomSimulation;

impl<E: RulesEngine> SimulationPolicy<E> for RandomSimulation {
    fn simulate(
        &self,
        engine: &E,
        state: &mut E::State,
        rng: &mut GameRng,
        max_depth: u32,
        evaluate: &dyn Fn(&E::State) -> f64,
    ) -> RolloutOutcome {
        let mut plies = 0;

        while plies < max_depth && engine.is_terminal(state).is_none() {
            let actions = engine.legal_actions(state);
            let Some(action) = rng.choose(&actions) else {
                break;
            };
            engine.apply_action(state, action);
            plies += 1;
        }

        RolloutOutcome {
            score: evaluate(state),
            plies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::games::president::{PresidentGame, PresidentHeuristic, PresidentParams, PresidentState};

    fn p(i: u8) -> PlayerId {
        PlayerId::new(i)
    }

    #[test]
    fn test_depth_bounded() {
        let mut state = PresidentState::from_hands(
            PresidentParams::default(),
            &[vec![2, 3, 4, 5], vec![2, 3, 4, 5], vec![6, 7, 8, 9]],
            p(0),
            0,
        )
        .unwrap();
        let mut rng = GameRng::new(1);

        let outcome = RandomSimulation.simulate(
            &PresidentGame,
            &mut state,
            &mut rng,
            3,
            &|_: &PresidentState| 0.25,
        );

        assert_eq!(outcome.plies, 3);
        assert_eq!(outcome.score, 0.25);
        assert_eq!(state.history().len(), 3);
    }

    #[test]
    fn test_zero_depth_scores_immediately() {
        let mut state = PresidentState::from_hands(
            PresidentParams::default(),
            &[vec![2, 3], vec![4, 5]],
            p(0),
            0,
        )
        .unwrap();
        let heuristic = PresidentHeuristic::default();
        let expected = heuristic.evaluate(&state, p(0));

        let outcome = RandomSimulation.simulate(
            &PresidentGame,
            &mut state,
            &mut GameRng::new(0),
            0,
            &|s: &PresidentState| heuristic.evaluate(s, p(0)),
        );

        assert_eq!(outcome.plies, 0);
        assert_eq!(outcome.score, expected);
    }

    #[test]
    fn test_stops_at_terminal() {
        // Player 0 finishes on the first ply in a two-player game
        let mut state =
            PresidentState::from_hands(PresidentParams::default(), &[vec![9], vec![2, 3]], p(0), 0)
                .unwrap();

        let outcome = RandomSimulation.simulate(
            &PresidentGame,
            &mut state,
            &mut GameRng::new(4),
            10,
            &|s: &PresidentState| s.game_score(p(0)),
        );

        assert_eq!(outcome.plies, 1);
        assert_eq!(outcome.score, 1.0);
        assert!(state.is_game_over());
    }
}
