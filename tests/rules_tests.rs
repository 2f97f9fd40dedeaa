//! Rules engine verification tests.
//!
//! Deal, turn, pass, bomb and end-of-game behavior, checked on fixed
//! scenarios and on random playouts over seeds and deck parameters.

use proptest::prelude::*;

use president_engine::core::{GameRng, PlayerId};
use president_engine::games::president::{
    Action, PlayerResult, PresidentGame, PresidentGameBuilder, PresidentParams, PresidentState,
    MAX_CARD_VALUE_OPTIONS, MIN_CARD_VALUE_OPTIONS,
};
use president_engine::rules::RulesEngine;

fn p(i: u8) -> PlayerId {
    PlayerId::new(i)
}

/// Play uniformly random legal actions until the game ends, calling `check`
/// after every action with the state it was applied to.
fn random_playout(
    state: &mut PresidentState,
    seed: u64,
    mut check: impl FnMut(&PresidentState, Option<(&PresidentState, &Action)>),
) {
    let game = PresidentGame;
    let mut rng = GameRng::new(seed);

    for _ in 0..500 {
        if game.is_terminal(state).is_some() {
            return;
        }
        let actions = game.legal_actions(state);
        assert!(!actions.is_empty());
        let action = actions[rng.gen_range_usize(0..actions.len())];

        let before = state.clone();
        game.apply_action(state, &action);
        check(&*state, Some((&before, &action)));
    }
    panic!("game did not end within 500 actions");
}

/// Scenario: three players already emptied their hands.
#[test]
fn test_game_ends_when_one_player_holds_cards() {
    let mut state = PresidentState::from_hands(
        PresidentParams::default(),
        &[vec![], vec![], vec![], vec![4, 6, 8]],
        p(3),
        0,
    )
    .unwrap();

    assert!(PresidentGame.check_game_end(&mut state));
    assert!(state.is_game_over());
    for (i, rank) in [(0, 1), (1, 2), (2, 3)] {
        assert_eq!(state.finish_rank(p(i)), Some(rank));
    }
    assert_eq!(state.finish_rank(p(3)), None);
    assert_eq!(state.result(p(3)), PlayerResult::Loss);
    assert_eq!(state.result(p(0)), PlayerResult::Win);
    assert_eq!(state.result(p(2)), PlayerResult::Draw);

    assert_eq!(state.game_score(p(0)), 3.0);
    assert_eq!(state.game_score(p(2)), 1.0);
    assert_eq!(state.game_score(p(3)), 0.0);
}

/// The game ends on the very action that creates the third finisher.
#[test]
fn test_game_ends_on_third_finisher() {
    let mut state = PresidentState::from_hands(
        PresidentParams::default(),
        &[vec![], vec![], vec![7], vec![4, 6, 8]],
        p(2),
        0,
    )
    .unwrap();
    assert!(!PresidentGame.check_game_end(&mut state));
    assert_eq!(state.finished_count(), 2);

    let play = PresidentGame.legal_actions(&state)[0];
    PresidentGame.apply_action(&mut state, &play);

    assert!(state.is_game_over());
    assert_eq!(state.finish_rank(p(2)), Some(3));
    let result = PresidentGame.is_terminal(&state).unwrap();
    assert_eq!(result.finish_order(), &[p(0), p(1), p(2), p(3)]);
    assert_eq!(result.loser(), p(3));
}

/// Scenario: a lone top card on an open pile.
#[test]
fn test_lone_bomb_opener() {
    let mut state = PresidentState::from_hands(
        PresidentParams::default(),
        &[vec![10], vec![2, 3], vec![4, 5]],
        p(0),
        0,
    )
    .unwrap();

    let actions = PresidentGame.legal_actions(&state);
    assert_eq!(actions, vec![Action::one(state.hand(p(0))[0])]);

    PresidentGame.apply_action(&mut state, &actions[0]);

    assert!(state.discard_pile().is_empty());
    assert!(state.is_first_card());
    assert_eq!(state.current_value(), 0);
    assert_eq!(state.finish_rank(p(0)), Some(1));
    assert!(!state.is_game_over());
    // The emptied hand hands the turn on
    assert_eq!(state.current_player(), p(1));
}

#[test]
fn test_pair_bomb_clears_pile() {
    let mut state = PresidentState::from_hands(
        PresidentParams::default(),
        &[vec![10, 10, 3], vec![2, 4]],
        p(0),
        0,
    )
    .unwrap()
    .with_pile(7, 2)
    .unwrap();

    let actions = PresidentGame.legal_actions(&state);
    assert_eq!(actions.len(), 1);
    PresidentGame.apply_action(&mut state, &actions[0]);

    assert!(state.discard_pile().is_empty());
    assert!(state.is_first_card());
    assert_eq!(state.required_count(), 0);
    assert_eq!(state.current_player(), p(0));
}

#[test]
fn test_bomb_respects_configured_maximum() {
    let params = PresidentParams::default().with_max_card_value(12);
    let mut state =
        PresidentState::from_hands(params, &[vec![10, 4], vec![2, 3]], p(0), 0).unwrap();

    let ten = Action::one(state.hand(p(0))[0]);
    PresidentGame.apply_action(&mut state, &ten);

    assert_eq!(state.current_value(), 10);
    assert_eq!(state.discard_pile().len(), 1);
    assert_eq!(state.current_player(), p(1));
}

#[test]
fn test_pass_sequence_below_table_size() {
    let mut state = PresidentState::from_hands(
        PresidentParams::default(),
        &[vec![2, 3], vec![2, 4], vec![3, 4], vec![5, 6]],
        p(0),
        0,
    )
    .unwrap()
    .with_pile(9, 1)
    .unwrap();

    for k in 1..=3u8 {
        PresidentGame.apply_action(&mut state, &Action::Pass);
        assert_eq!(state.pass_streak(), k);
        assert_eq!(state.current_value(), 9);
        assert_eq!(state.required_count(), 1);
        assert_eq!(state.discard_pile().len(), 1);
    }

    PresidentGame.apply_action(&mut state, &Action::Pass);
    assert_eq!(state.pass_streak(), 0);
    assert!(state.discard_pile().is_empty());
    assert!(state.is_first_card());
    assert_eq!(state.current_value(), 0);
}

#[test]
fn test_pass_streak_counts_active_players_only() {
    let mut state = PresidentState::from_hands(
        PresidentParams::default(),
        &[vec![2, 3], vec![], vec![4, 5], vec![2, 6]],
        p(0),
        0,
    )
    .unwrap()
    .with_pile(8, 1)
    .unwrap();
    assert!(!PresidentGame.check_game_end(&mut state));
    assert_eq!(state.active_player_count(), 3);

    PresidentGame.apply_action(&mut state, &Action::Pass);
    // Player 1 is finished and skipped
    assert_eq!(state.current_player(), p(2));
    PresidentGame.apply_action(&mut state, &Action::Pass);
    PresidentGame.apply_action(&mut state, &Action::Pass);

    assert!(state.is_first_card());
    assert_eq!(state.current_player(), p(0));
}

#[test]
fn test_opener_fixes_required_count() {
    let mut state = PresidentState::from_hands(
        PresidentParams::default(),
        &[vec![4, 4, 9], vec![5, 5, 6], vec![2, 7, 7]],
        p(0),
        0,
    )
    .unwrap();

    let pair = PresidentGame
        .legal_actions(&state)
        .into_iter()
        .find(|a| a.card_count() == 2)
        .unwrap();
    PresidentGame.apply_action(&mut state, &pair);
    assert_eq!(state.required_count(), 2);

    // Only pairs above 4 from here on
    let actions = PresidentGame.legal_actions(&state);
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0].value(), Some(5));
    assert_eq!(actions[0].card_count(), 2);
}

#[test]
fn test_history_records_turns() {
    let mut state = PresidentState::from_hands(
        PresidentParams::default(),
        &[vec![3, 10, 4], vec![5, 6]],
        p(0),
        0,
    )
    .unwrap()
    .with_pile(2, 1)
    .unwrap();

    let bomb = Action::one(state.hand(p(0))[1]);
    PresidentGame.apply_action(&mut state, &bomb);
    let opener = PresidentGame.legal_actions(&state)[0];
    PresidentGame.apply_action(&mut state, &opener);

    let history = state.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].player, p(0));
    assert_eq!(history[1].player, p(0));
    assert_eq!(history[0].turn, history[1].turn);
    assert_eq!(history[1].sequence, 1);
    assert_eq!(state.current_player(), p(1));
}

#[test]
fn test_full_game_every_table_size() {
    for player_count in 2..=4 {
        let (game, mut state) = PresidentGameBuilder::new()
            .player_count(player_count)
            .build(17)
            .unwrap();

        random_playout(&mut state, 5, |_, _| {});

        let result = game.is_terminal(&state).unwrap();
        assert_eq!(result.finish_order().len(), player_count);
        let losers = PlayerId::all(player_count)
            .filter(|&p| state.result(p) == PlayerResult::Loss)
            .count();
        assert_eq!(losers, 1);
        assert_eq!(state.result(result.winner()), PlayerResult::Win);
        assert_eq!(state.game_score(result.winner()), (player_count - 1) as f64);
    }
}

fn params_strategy() -> impl Strategy<Value = PresidentParams> {
    (
        prop::sample::select(MIN_CARD_VALUE_OPTIONS.to_vec()),
        prop::sample::select(MAX_CARD_VALUE_OPTIONS.to_vec()),
    )
        .prop_map(|(min, max)| {
            PresidentParams::default()
                .with_min_card_value(min)
                .with_max_card_value(max)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_deal_is_complete_and_even(
        player_count in 2usize..=4,
        params in params_strategy(),
        seed in any::<u64>(),
    ) {
        let (_, state) = PresidentGameBuilder::new()
            .player_count(player_count)
            .params(params)
            .build(seed)
            .unwrap();

        let sizes: Vec<usize> = PlayerId::all(player_count).map(|p| state.hand(p).len()).collect();
        prop_assert_eq!(sizes.iter().sum::<usize>(), params.n_number_cards());
        let spread = sizes.iter().max().unwrap() - sizes.iter().min().unwrap();
        prop_assert!(spread <= 1);

        for value in params.values() {
            let copies = PlayerId::all(player_count)
                .flat_map(|p| state.hand(p).iter())
                .filter(|c| c.value == value)
                .count();
            prop_assert_eq!(copies, params.copies_per_value as usize);
        }
    }

    #[test]
    fn prop_round_invariants_hold(
        player_count in 2usize..=4,
        params in params_strategy(),
        seed in any::<u64>(),
    ) {
        let (_, mut state) = PresidentGameBuilder::new()
            .player_count(player_count)
            .params(params)
            .build(seed)
            .unwrap();
        let max = params.max_card_value;

        random_playout(&mut state, seed ^ 0xA5A5, |after, step| {
            assert_eq!(after.is_first_card(), after.current_value() == 0);
            assert!(after.required_count() <= 2);

            let Some((before, action)) = step else { return };
            if action.value() == Some(max) {
                assert!(after.discard_pile().is_empty());
                assert!(after.is_first_card());
            }
            if let Action::PlayPair { first, second, value } = *action {
                assert_eq!(first.value, value);
                assert_eq!(second.value, value);
                assert!(before.is_first_card() || value > before.current_value());
                assert!(before.hand(before.current_player()).contains(&first));
                assert!(before.hand(before.current_player()).contains(&second));
            }
        });
    }

    #[test]
    fn prop_legal_actions_respect_pile(
        player_count in 2usize..=4,
        seed in any::<u64>(),
    ) {
        let (game, mut state) = PresidentGameBuilder::new()
            .player_count(player_count)
            .build(seed)
            .unwrap();

        random_playout(&mut state, seed, |after, _| {
            if after.is_game_over() {
                return;
            }
            let actions = game.legal_actions(after);
            let passes = actions.iter().filter(|a| a.is_pass()).count();
            assert!(passes == 0 || actions.len() == 1);
            for action in actions.iter().filter(|a| !a.is_pass()) {
                let value = action.value().unwrap();
                assert!(after.is_first_card() || value > after.current_value());
                assert!(after.required_count() == 0 || after.required_count() == action.card_count());
            }
        });
    }
}
