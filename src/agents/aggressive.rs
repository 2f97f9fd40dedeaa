use tracing::debug;

use super::{win_probability, Agent};
use crate::games::president::{Action, PresidentGame, PresidentState};

/// Plays whatever is least likely to be beaten.
///
/// Ties go to the first candidate. Passes only when forced.
#[derive(Clone, Copy, Debug, Default)]
pub struct AggressiveAgent;

impl Agent for AggressiveAgent {
    fn name(&self) -> &'static str {
        "aggressive"
    }

    fn choose(&mut self, _game: &PresidentGame, state: &PresidentState, actions: &[Action]) -> Action {
        assert!(!actions.is_empty(), "No legal actions to choose from");

        let mut best: Option<(Action, f64)> = None;
        for action in actions {
            let Some(p_win) = win_probability(state, action) else {
                continue;
            };
            if best.map_or(true, |(_, b)| p_win > b) {
                best = Some((*action, p_win));
            }
        }

        match best {
            Some((action, p_win)) => {
                debug!(agent = self.name(), %action, p_win, "chose action");
                action
            }
            None => actions[0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::games::president::PresidentParams;

    #[test]
    fn test_prefers_highest_value() {
        let state = PresidentState::from_hands(
            PresidentParams::default(),
            &[vec![3, 6, 9], vec![2, 4], vec![5, 7]],
            PlayerId::new(0),
            0,
        )
        .unwrap()
        .with_pile(2, 1)
        .unwrap();
        let actions = crate::rules::RulesEngine::legal_actions(&PresidentGame, &state);

        let chosen = AggressiveAgent.choose(&PresidentGame, &state, &actions);
        assert_eq!(chosen.value(), Some(9));
    }

    #[test]
    fn test_passes_only_when_forced() {
        let state = PresidentState::from_hands(
            PresidentParams::default(),
            &[vec![3], vec![2, 4]],
            PlayerId::new(0),
            0,
        )
        .unwrap()
        .with_pile(5, 1)
        .unwrap();

        let chosen = AggressiveAgent.choose(&PresidentGame, &state, &[Action::Pass]);
        assert!(chosen.is_pass());
    }
}
