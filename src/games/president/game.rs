//! President rules engine and turn resolver.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use super::action::Action;
use super::card::{Card, CardId};
use super::params::PresidentParams;
use super::state::{PlayerResult, PresidentState, RoundState};
use crate::agents::Agent;
use crate::core::{GameRng, PlayerId, PlayerMap};
use crate::error::Result;
use crate::rules::{GameResult, RulesEngine};

/// President rules.
///
/// Stateless: every rule reads the parameters carried by the state.
#[derive(Clone, Copy, Debug, Default)]
pub struct PresidentGame;

/// Builder for creating a President game.
#[derive(Clone, Debug)]
pub struct PresidentGameBuilder {
    player_count: usize,
    params: PresidentParams,
}

impl Default for PresidentGameBuilder {
    fn default() -> Self {
        Self {
            player_count: 4,
            params: PresidentParams::default(),
        }
    }
}

impl PresidentGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    pub fn params(mut self, params: PresidentParams) -> Self {
        self.params = params;
        self
    }

    /// Build the deck, shuffle, deal round-robin from player 0 and pick a
    /// uniformly random first player.
    pub fn build(self, seed: u64) -> Result<(PresidentGame, PresidentState)> {
        PresidentParams::validate_player_count(self.player_count)?;
        self.params.validate()?;

        let mut rng = GameRng::new(seed);

        let mut deck: Vec<Card> = Vec::with_capacity(self.params.n_number_cards());
        for value in self.params.values() {
            for _ in 0..self.params.copies_per_value {
                deck.push(Card::new(CardId(deck.len() as u16), value));
            }
        }
        rng.shuffle(&mut deck);

        let mut hands: PlayerMap<Vec<Card>> = PlayerMap::with_default(self.player_count);
        for (i, card) in deck.into_iter().enumerate() {
            hands[PlayerId::new((i % self.player_count) as u8)].push(card);
        }

        let first = PlayerId::new(rng.gen_range_usize(0..self.player_count) as u8);
        debug!(
            players = self.player_count,
            cards = self.params.n_number_cards(),
            first = first.0,
            seed,
            "dealt new game"
        );

        let state = PresidentState::new(
            self.params,
            hands,
            Vec::new(),
            RoundState::open(),
            first,
            rng,
        );
        Ok((PresidentGame, state))
    }
}

impl PresidentGame {
    /// Rank every player who just emptied their hand, then end the game
    /// once all but one player have finished.
    ///
    /// Returns true if the game is over.
    pub fn check_game_end(&self, state: &mut PresidentState) -> bool {
        if state.is_game_over() {
            return true;
        }

        let player_count = state.player_count();
        let mut done = state.finished_count();
        for player in PlayerId::all(player_count) {
            if state.hand(player).is_empty() && state.result(player) == PlayerResult::Ongoing {
                done += 1;
                state.mark_finished(player, done as u8);
                debug!(player = player.0, rank = done, "player emptied their hand");
            }
        }

        if done + 1 < player_count {
            return false;
        }

        state.end_game();
        let order = state.finish_order();
        info!(
            winner = order[0].0,
            loser = order[order.len() - 1].0,
            order = ?order,
            turns = state.turn_number(),
            "game over"
        );
        true
    }

    /// Resolve the turn after an action: end the game, grant a bomb's
    /// extra turn, or move on to the next unfinished seat.
    fn after_action(&self, state: &mut PresidentState, actor: PlayerId) {
        let again = state.take_play_again();
        if self.check_game_end(state) {
            return;
        }

        if again && !state.hand(actor).is_empty() {
            state.hand_turn_to(actor);
        } else {
            let next = state.next_player();
            state.hand_turn_to(next);
        }
    }

    /// Drive a game to completion with one agent per seat.
    ///
    /// Returns `None` if `max_moves` actions were applied without the game
    /// ending.
    pub fn play_game(
        &self,
        state: &mut PresidentState,
        agents: &mut [Box<dyn Agent>],
        max_moves: usize,
    ) -> Option<GameResult> {
        assert_eq!(
            agents.len(),
            state.player_count(),
            "Need one agent per seat"
        );

        for _ in 0..max_moves {
            if let Some(result) = self.is_terminal(state) {
                return Some(result);
            }

            let player = self.active_player(state);
            let actions = self.legal_actions(state);
            let action = agents[player.index()].choose(self, state, &actions);
            debug_assert!(actions.contains(&action), "agent chose an illegal action");
            self.apply_action(state, &action);
        }

        self.is_terminal(state)
    }
}

impl RulesEngine for PresidentGame {
    type State = PresidentState;
    type Action = Action;

    fn active_player(&self, state: &PresidentState) -> PlayerId {
        state.current_player()
    }

    fn legal_actions(&self, state: &PresidentState) -> Vec<Action> {
        if state.is_game_over() {
            return Vec::new();
        }

        let player = state.current_player();
        let round = state.round();
        let mut actions = Vec::new();

        if round.allows_count(1) {
            actions.extend(
                state
                    .hand(player)
                    .iter()
                    .filter(|c| round.accepts(c.value))
                    .map(|&card| Action::one(card)),
            );
        }

        if round.allows_count(2) {
            // First two playable cards of each value, in first-seen order
            let mut groups: SmallVec<[SmallVec<[Card; 2]>; 8]> = SmallVec::new();
            let mut slots: FxHashMap<u8, usize> = FxHashMap::default();
            for &card in state.hand(player).iter().filter(|c| round.accepts(c.value)) {
                let slot = *slots.entry(card.value).or_insert_with(|| {
                    groups.push(SmallVec::new());
                    groups.len() - 1
                });
                if groups[slot].len() < 2 {
                    groups[slot].push(card);
                }
            }
            actions.extend(
                groups
                    .iter()
                    .filter(|g| g.len() == 2)
                    .map(|g| Action::pair(g[0], g[1])),
            );
        }

        if actions.is_empty() {
            actions.push(Action::Pass);
        }

        trace!(
            player = player.0,
            current_value = round.current_value,
            required = round.required_count,
            count = actions.len(),
            "legal actions"
        );
        actions
    }

    fn apply_action(&self, state: &mut PresidentState, action: &Action) {
        assert!(!state.is_game_over(), "Cannot act after the game is over");

        let actor = state.current_player();
        let current_value = state.current_value();

        action.apply(state, actor);
        state.record(actor, *action);
        state
            .beliefs_mut()
            .update(actor, action.observation(current_value));

        self.after_action(state, actor);
    }

    fn is_terminal(&self, state: &PresidentState) -> Option<GameResult> {
        state
            .is_game_over()
            .then(|| GameResult::new(state.finish_order()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PresidentError;

    fn p(i: u8) -> PlayerId {
        PlayerId::new(i)
    }

    fn fixture(hands: &[Vec<u8>], current: u8) -> PresidentState {
        PresidentState::from_hands(PresidentParams::default(), hands, p(current), 7).unwrap()
    }

    #[test]
    fn test_game_creation() {
        let (_, state) = PresidentGameBuilder::new().player_count(4).build(42).unwrap();

        assert_eq!(state.player_count(), 4);
        let sizes: Vec<usize> = PlayerId::all(4).map(|p| state.hand(p).len()).collect();
        assert_eq!(sizes.iter().sum::<usize>(), 18);
        assert_eq!(sizes, vec![5, 5, 4, 4]);
        assert!(state.is_first_card());
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_builder_rejects_bad_config() {
        assert_eq!(
            PresidentGameBuilder::new().player_count(5).build(0).unwrap_err(),
            PresidentError::UnsupportedPlayerCount(5)
        );
        assert_eq!(
            PresidentGameBuilder::new()
                .params(PresidentParams::default().with_copies_per_value(0))
                .build(0)
                .unwrap_err(),
            PresidentError::NoCopies
        );
    }

    #[test]
    fn test_deal_is_deterministic() {
        let (_, a) = PresidentGameBuilder::new().build(9).unwrap();
        let (_, b) = PresidentGameBuilder::new().build(9).unwrap();

        assert_eq!(a.current_player(), b.current_player());
        for player in PlayerId::all(4) {
            assert_eq!(a.hand(player), b.hand(player));
        }
    }

    #[test]
    fn test_opening_actions() {
        let state = fixture(&[vec![3, 5, 3, 5, 5], vec![2]], 0);
        let actions = PresidentGame.legal_actions(&state);

        // Five singles, then one pair per value in first-seen order
        assert_eq!(actions.len(), 7);
        assert!(actions[..5].iter().all(|a| a.card_count() == 1));
        assert_eq!(actions[5].value(), Some(3));
        assert_eq!(actions[6].value(), Some(5));
        let hand = state.hand(p(0));
        assert_eq!(actions[6], Action::pair(hand[1], hand[3]));
    }

    #[test]
    fn test_constrained_actions() {
        let state = fixture(&[vec![4, 7, 7, 9], vec![2]], 0)
            .with_pile(6, 2)
            .unwrap();
        let actions = PresidentGame.legal_actions(&state);

        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].value(), Some(7));
        assert_eq!(actions[0].card_count(), 2);

        let singles = fixture(&[vec![4, 7, 7], vec![2]], 0).with_pile(6, 1).unwrap();
        let actions = PresidentGame.legal_actions(&singles);
        assert_eq!(actions.len(), 2);
        assert!(actions.iter().all(|a| a.card_count() == 1));
    }

    #[test]
    fn test_pass_only_when_stuck() {
        let state = fixture(&[vec![3, 4], vec![2]], 0).with_pile(8, 1).unwrap();
        assert_eq!(PresidentGame.legal_actions(&state), vec![Action::Pass]);
    }

    #[test]
    fn test_turn_advances_after_play() {
        let mut state = fixture(&[vec![3, 4], vec![5, 6], vec![7, 8]], 0);
        let actions = PresidentGame.legal_actions(&state);

        PresidentGame.apply_action(&mut state, &actions[0]);

        assert_eq!(state.current_player(), p(1));
        assert_eq!(state.current_value(), 3);
        assert_eq!(state.history().len(), 1);
        assert_eq!(state.history()[0].player, p(0));
        assert_eq!(state.turn_number(), 2);
    }

    #[test]
    fn test_bomb_grants_extra_turn() {
        let mut state = fixture(&[vec![10, 4], vec![5, 6]], 0).with_pile(6, 1).unwrap();
        let bomb = Action::one(state.hand(p(0))[0]);

        PresidentGame.apply_action(&mut state, &bomb);

        assert_eq!(state.current_player(), p(0));
        assert!(state.is_first_card());
        assert!(state.discard_pile().is_empty());
        assert!(!state.play_again());
        assert_eq!(state.history()[0].turn, state.turn_number());
    }

    #[test]
    fn test_pass_round_clears_pile() {
        let mut state = fixture(&[vec![2, 3], vec![2, 4], vec![3, 4]], 0)
            .with_pile(8, 1)
            .unwrap();

        PresidentGame.apply_action(&mut state, &Action::Pass);
        PresidentGame.apply_action(&mut state, &Action::Pass);
        assert_eq!(state.pass_streak(), 2);
        assert_eq!(state.current_value(), 8);

        PresidentGame.apply_action(&mut state, &Action::Pass);
        assert_eq!(state.pass_streak(), 0);
        assert!(state.is_first_card());
        assert!(state.discard_pile().is_empty());
        assert_eq!(state.current_player(), p(0));
    }

    #[test]
    fn test_game_end_on_last_finisher() {
        let mut state = fixture(&[vec![], vec![], vec![], vec![3, 4, 5]], 3);

        assert!(PresidentGame.check_game_end(&mut state));
        assert!(state.is_game_over());
        assert_eq!(state.finish_rank(p(0)), Some(1));
        assert_eq!(state.finish_rank(p(1)), Some(2));
        assert_eq!(state.finish_rank(p(2)), Some(3));
        assert_eq!(state.finish_rank(p(3)), None);
        assert_eq!(state.result(p(0)), PlayerResult::Win);
        assert_eq!(state.result(p(1)), PlayerResult::Draw);
        assert_eq!(state.result(p(3)), PlayerResult::Loss);

        let result = PresidentGame.is_terminal(&state).unwrap();
        assert_eq!(result.winner(), p(0));
        assert_eq!(result.loser(), p(3));
    }

    #[test]
    fn test_two_player_game_ends_on_first_finisher() {
        let mut state = fixture(&[vec![9], vec![2, 3]], 0);
        let play = PresidentGame.legal_actions(&state)[0];

        PresidentGame.apply_action(&mut state, &play);

        assert!(state.is_game_over());
        assert_eq!(state.game_score(p(0)), 1.0);
        assert_eq!(state.game_score(p(1)), 0.0);
        assert!(PresidentGame.legal_actions(&state).is_empty());
    }

    #[test]
    #[should_panic(expected = "after the game is over")]
    fn test_no_action_after_game_over() {
        let mut state = fixture(&[vec![9], vec![2]], 0);
        let play = PresidentGame.legal_actions(&state)[0];
        PresidentGame.apply_action(&mut state, &play);
        PresidentGame.apply_action(&mut state, &Action::Pass);
    }
}
