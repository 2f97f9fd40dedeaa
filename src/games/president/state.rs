//! President game state.
//!
//! ## RoundState
//!
//! The constraint the next play must satisfy: the active value, whether
//! singles or pairs are required, and the consecutive-pass streak.
//!
//! ## PresidentState
//!
//! Complete game state:
//! - Hands, discard pile, round constraint
//! - Finish ranks and per-player results
//! - The shared probability model (written only by the rules engine)
//! - Action history and RNG

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::action::Action;
use super::card::{Card, CardId};
use super::params::PresidentParams;
use crate::belief::ProbabilityModel;
use crate::core::{ActionRecord, GameRng, PlayerId, PlayerMap};
use crate::error::{PresidentError, Result};

/// Constraint imposed by the active card(s) on the pile.
///
/// Invariant: `is_first_card == (current_value == 0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundState {
    /// Value on the pile, 0 when the pile is open.
    pub current_value: u8,

    /// 0 = singles or pairs (open pile only), 1 = singles, 2 = pairs.
    pub required_count: u8,

    /// True when no card constrains the next play.
    pub is_first_card: bool,

    /// Consecutive passes since the last play.
    pub pass_streak: u8,
}

impl RoundState {
    /// An open pile: anything may be played.
    #[must_use]
    pub const fn open() -> Self {
        Self {
            current_value: 0,
            required_count: 0,
            is_first_card: true,
            pass_streak: 0,
        }
    }

    /// True if a card of `value` may be played on this pile.
    #[must_use]
    pub fn accepts(&self, value: u8) -> bool {
        self.is_first_card || value > self.current_value
    }

    /// True if `count` cards may be played together on this pile.
    #[must_use]
    pub fn allows_count(&self, count: u8) -> bool {
        self.required_count == 0 || self.required_count == count
    }

    fn reset(&mut self) {
        *self = Self::open();
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::open()
    }
}

/// Outcome recorded for a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerResult {
    /// Still holding cards.
    Ongoing,
    /// Emptied their hand; after the game ends only first place keeps it.
    Win,
    /// Finished between first and last place.
    Draw,
    /// The last player holding cards.
    Loss,
}

/// Full President game state.
#[derive(Clone, Debug)]
pub struct PresidentState {
    params: PresidentParams,

    /// Private hands per player, in deal order.
    hands: PlayerMap<Vec<Card>>,

    /// Cards played since the pile was last cleared.
    discard: Vec<Card>,

    round: RoundState,

    /// 1-based order in which players emptied their hands.
    finish_rank: PlayerMap<Option<u8>>,

    results: PlayerMap<PlayerResult>,

    current_player: PlayerId,

    /// Set by a bomb until the turn resolver consumes it.
    play_again: bool,

    game_over: bool,

    beliefs: ProbabilityModel,

    history: Vector<ActionRecord<Action>>,

    turn_number: u32,

    action_sequence: u32,

    /// Deterministic RNG.
    pub rng: GameRng,
}

impl PresidentState {
    /// Assemble a state from dealt hands.
    ///
    /// The probability model is seeded from public information only: the
    /// discard pile. Hands are hidden, so dealt cards still count as unseen.
    pub(crate) fn new(
        params: PresidentParams,
        hands: PlayerMap<Vec<Card>>,
        discard: Vec<Card>,
        round: RoundState,
        current_player: PlayerId,
        rng: GameRng,
    ) -> Self {
        let player_count = hands.player_count();
        let beliefs = ProbabilityModel::new(
            player_count,
            params.max_card_value,
            params.copies_per_value,
            discard.iter(),
        );

        Self {
            params,
            hands,
            discard,
            round,
            finish_rank: PlayerMap::with_value(player_count, None),
            results: PlayerMap::with_value(player_count, PlayerResult::Ongoing),
            current_player,
            play_again: false,
            game_over: false,
            beliefs,
            history: Vector::new(),
            turn_number: 1,
            action_sequence: 0,
            rng,
        }
    }

    /// Build a position from explicit hand values, for tests and hosts that
    /// resume from a known deal.
    ///
    /// Cards get ids in hand order. The pile starts open; use
    /// [`with_pile`](Self::with_pile) to put a constraint on it.
    pub fn from_hands(
        params: PresidentParams,
        hands: &[Vec<u8>],
        current_player: PlayerId,
        seed: u64,
    ) -> Result<Self> {
        params.validate()?;
        PresidentParams::validate_player_count(hands.len())?;
        if current_player.index() >= hands.len() {
            return Err(PresidentError::UnknownPlayer {
                player: current_player.0,
                player_count: hands.len(),
            });
        }

        let mut next_id = 0u16;
        let mut dealt: PlayerMap<Vec<Card>> = PlayerMap::with_default(hands.len());
        for (player, values) in PlayerId::all(hands.len()).zip(hands) {
            for &value in values {
                params.validate_value(value)?;
                dealt[player].push(Card::new(CardId(next_id), value));
                next_id += 1;
            }
        }

        Ok(Self::new(
            params,
            dealt,
            Vec::new(),
            RoundState::open(),
            current_player,
            GameRng::new(seed),
        ))
    }

    /// Put `count` cards of `value` on the pile as the active play.
    pub fn with_pile(mut self, value: u8, count: u8) -> Result<Self> {
        self.params.validate_value(value)?;
        if !(1..=2).contains(&count) || self.params.is_bomb(value) {
            return Err(PresidentError::InvalidPile { value, count });
        }

        let mut next_id = self
            .hands
            .values()
            .flatten()
            .chain(&self.discard)
            .map(|c| c.id.0 + 1)
            .max()
            .unwrap_or(0);
        self.discard = (0..count)
            .map(|_| {
                let card = Card::new(CardId(next_id), value);
                next_id += 1;
                card
            })
            .collect();
        self.round = RoundState {
            current_value: value,
            required_count: count,
            is_first_card: false,
            pass_streak: 0,
        };
        self.beliefs = ProbabilityModel::new(
            self.player_count(),
            self.params.max_card_value,
            self.params.copies_per_value,
            self.discard.iter(),
        );
        Ok(self)
    }

    // === Queries ===

    #[must_use]
    pub fn params(&self) -> &PresidentParams {
        &self.params
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.hands.player_count()
    }

    /// A player's hand.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[Card] {
        &self.hands[player]
    }

    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard
    }

    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    #[must_use]
    pub fn current_value(&self) -> u8 {
        self.round.current_value
    }

    #[must_use]
    pub fn required_count(&self) -> u8 {
        self.round.required_count
    }

    #[must_use]
    pub fn is_first_card(&self) -> bool {
        self.round.is_first_card
    }

    #[must_use]
    pub fn pass_streak(&self) -> u8 {
        self.round.pass_streak
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// True while a bomb's extra turn has not been resolved.
    #[must_use]
    pub fn play_again(&self) -> bool {
        self.play_again
    }

    #[must_use]
    pub fn finish_rank(&self, player: PlayerId) -> Option<u8> {
        self.finish_rank[player]
    }

    #[must_use]
    pub fn is_finished(&self, player: PlayerId) -> bool {
        self.finish_rank[player].is_some()
    }

    #[must_use]
    pub fn result(&self, player: PlayerId) -> PlayerResult {
        self.results[player]
    }

    /// Number of players who already emptied their hands.
    #[must_use]
    pub fn finished_count(&self) -> usize {
        self.finish_rank.values().filter(|r| r.is_some()).count()
    }

    /// Number of players still holding a rank-less seat.
    #[must_use]
    pub fn active_player_count(&self) -> usize {
        self.player_count() - self.finished_count()
    }

    /// Finished players by rank, followed by those without a rank.
    #[must_use]
    pub fn finish_order(&self) -> Vec<PlayerId> {
        let mut finished: Vec<(u8, PlayerId)> = self
            .finish_rank
            .iter()
            .filter_map(|(p, r)| r.map(|rank| (rank, p)))
            .collect();
        finished.sort_unstable();

        finished
            .into_iter()
            .map(|(_, p)| p)
            .chain(self.finish_rank.iter().filter(|(_, r)| r.is_none()).map(|(p, _)| p))
            .collect()
    }

    /// Terminal score: `player_count - rank` once finished, 0 otherwise.
    #[must_use]
    pub fn game_score(&self, player: PlayerId) -> f64 {
        match self.finish_rank[player] {
            Some(rank) => self.player_count() as f64 - f64::from(rank),
            None => 0.0,
        }
    }

    /// The shared opponent-hand model. Agents read it; only the rules
    /// engine updates it.
    #[must_use]
    pub fn beliefs(&self) -> &ProbabilityModel {
        &self.beliefs
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord<Action>> {
        &self.history
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// First unfinished seat after the current one, wrapping around.
    ///
    /// Falls back to the current player when nobody else is left.
    #[must_use]
    pub fn next_player(&self) -> PlayerId {
        let player_count = self.player_count();
        let mut candidate = self.current_player;
        for _ in 0..player_count {
            candidate = candidate.following(player_count);
            if self.finish_rank[candidate].is_none() {
                return candidate;
            }
        }
        self.current_player
    }

    /// True if the card may be played on the current pile.
    #[must_use]
    pub fn is_playable(&self, card: &Card) -> bool {
        self.round.accepts(card.value)
    }

    #[must_use]
    pub fn average_card_value(&self, player: PlayerId) -> f64 {
        let hand = self.hand(player);
        if hand.is_empty() {
            return 0.0;
        }
        hand.iter().map(|c| f64::from(c.value)).sum::<f64>() / hand.len() as f64
    }

    /// Mean hand size over every other seat, finished or not.
    #[must_use]
    pub fn average_opponent_hand_size(&self, player: PlayerId) -> f64 {
        let (total, opponents) = self
            .hands
            .iter()
            .filter(|(p, _)| *p != player)
            .fold((0usize, 0usize), |(total, n), (_, hand)| (total + hand.len(), n + 1));
        if opponents == 0 {
            0.0
        } else {
            total as f64 / opponents as f64
        }
    }

    /// Cards in the hand that could be played on the current pile.
    #[must_use]
    pub fn playable_count(&self, player: PlayerId) -> usize {
        self.hand(player).iter().filter(|c| self.is_playable(c)).count()
    }

    /// Distinct values of which at least two playable cards are held.
    #[must_use]
    pub fn combo_count(&self, player: PlayerId) -> usize {
        let mut counts: FxHashMap<u8, u8> = FxHashMap::default();
        for card in self.hand(player).iter().filter(|c| self.is_playable(c)) {
            *counts.entry(card.value).or_default() += 1;
        }
        counts.values().filter(|&&n| n >= 2).count()
    }

    // === Cloning ===

    /// Clone the full state, hidden hands included.
    ///
    /// Takes `&mut self` because the copy gets a forked RNG.
    #[must_use]
    pub fn clone_state(&mut self) -> Self {
        let rng = self.rng.fork();
        Self {
            rng,
            ..self.clone()
        }
    }

    // === Mutation (rules engine only) ===

    pub(crate) fn hands_mut(&mut self) -> &mut PlayerMap<Vec<Card>> {
        &mut self.hands
    }

    pub(crate) fn beliefs_mut(&mut self) -> &mut ProbabilityModel {
        &mut self.beliefs
    }

    fn remove_from_hand(&mut self, player: PlayerId, card: Card) -> bool {
        let hand = &mut self.hands[player];
        if let Some(pos) = hand.iter().position(|&c| c == card) {
            hand.remove(pos);
            true
        } else {
            false
        }
    }

    /// Move cards of one value from the player's hand onto the pile.
    pub(crate) fn play_cards(&mut self, player: PlayerId, cards: &[Card]) {
        let value = cards[0].value;
        let count = cards.len() as u8;
        assert!(
            cards.iter().all(|c| c.value == value),
            "cards played together must share a value"
        );
        assert!(
            self.round.accepts(value),
            "{value} does not beat the active value {}",
            self.round.current_value
        );
        assert!(
            self.round.allows_count(count),
            "{count} card(s) played where {} are required",
            self.round.required_count
        );

        for &card in cards {
            assert!(
                self.remove_from_hand(player, card),
                "{player} does not hold card {card}"
            );
            self.discard.push(card);
        }

        self.round.current_value = value;
        self.round.pass_streak = 0;
        if self.round.is_first_card {
            self.round.is_first_card = false;
            self.round.required_count = count;
        }

        if self.params.is_bomb(value) {
            self.discard.clear();
            self.round.reset();
            self.play_again = true;
            debug!(player = player.0, value, count, "bomb clears the pile");
        }
    }

    /// Count a pass; clear the pile once every active player has passed.
    pub(crate) fn register_pass(&mut self, player: PlayerId) {
        self.round.pass_streak += 1;
        if usize::from(self.round.pass_streak) >= self.active_player_count() {
            self.discard.clear();
            self.round.reset();
            debug!(player = player.0, "every active player passed, pile cleared");
        }
    }

    pub(crate) fn record(&mut self, player: PlayerId, action: Action) {
        self.history.push_back(ActionRecord::new(
            player,
            action,
            self.turn_number,
            self.action_sequence,
        ));
    }

    /// Consume the bomb flag.
    pub(crate) fn take_play_again(&mut self) -> bool {
        std::mem::take(&mut self.play_again)
    }

    /// Give the turn to `player`; a repeat turn keeps the turn number.
    pub(crate) fn hand_turn_to(&mut self, player: PlayerId) {
        if player == self.current_player {
            self.action_sequence += 1;
        } else {
            self.current_player = player;
            self.turn_number += 1;
            self.action_sequence = 0;
        }
    }

    pub(crate) fn mark_finished(&mut self, player: PlayerId, rank: u8) {
        self.finish_rank[player] = Some(rank);
        self.results[player] = PlayerResult::Win;
    }

    /// Freeze the game: first place wins, the remaining player loses,
    /// everyone in between draws.
    pub(crate) fn end_game(&mut self) {
        self.game_over = true;
        for (player, rank) in self.finish_rank.iter() {
            self.results[player] = match rank {
                Some(1) => PlayerResult::Win,
                Some(_) => PlayerResult::Draw,
                None => PlayerResult::Loss,
            };
        }
    }
}
