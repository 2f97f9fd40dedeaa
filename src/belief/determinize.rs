//! Redeterminization: sample a concrete deal of the hidden hands as one
//! observer might imagine it.

use smallvec::SmallVec;

use super::model::{ProbabilityModel, PROBABILITY_FLOOR};
use crate::core::{GameRng, PlayerId};
use crate::games::president::{Card, PresidentState};

/// Copy `state` and re-deal every hand but the observer's.
///
/// All non-observer cards go into one pool. Each other player, in seat
/// order, draws as many cards as they held, without replacement, picking a
/// value with weight `belief * copies left in the pool`. Leftovers are
/// dealt round-robin to the non-observers.
///
/// The original state is never touched. The copy carries an RNG forked from
/// `rng`, so repeated calls give independent samples.
#[must_use]
pub fn determinize(state: &PresidentState, observer: PlayerId, rng: &mut GameRng) -> PresidentState {
    let mut copy = state.clone();
    copy.rng = rng.fork();

    let player_count = state.player_count();
    let others: SmallVec<[PlayerId; 4]> = PlayerId::all(player_count)
        .filter(|&p| p != observer)
        .collect();
    if others.is_empty() {
        return copy;
    }

    let mut pool: Vec<Card> = others
        .iter()
        .flat_map(|&p| state.hand(p).iter().copied())
        .collect();

    let hands = copy.hands_mut();
    for &player in &others {
        let target = state.hand(player).len();
        let mut drawn = Vec::with_capacity(target);
        while drawn.len() < target && !pool.is_empty() {
            let value = draw_value(&pool, state.beliefs(), player, rng);
            let index = pool.iter().position(|c| c.value == value).unwrap_or(0);
            drawn.push(pool.remove(index));
        }
        hands[player] = drawn;
    }

    for (i, card) in pool.into_iter().enumerate() {
        hands[others[i % others.len()]].push(card);
    }

    copy
}

/// Pick a value present in the pool, weighted by belief times multiplicity.
fn draw_value(pool: &[Card], beliefs: &ProbabilityModel, player: PlayerId, rng: &mut GameRng) -> u8 {
    let mut values: SmallVec<[(u8, u32); 16]> = SmallVec::new();
    for card in pool {
        match values.iter_mut().find(|(v, _)| *v == card.value) {
            Some((_, count)) => *count += 1,
            None => values.push((card.value, 1)),
        }
    }

    let weights: SmallVec<[f64; 16]> = values
        .iter()
        .map(|&(v, count)| beliefs.belief(player, v).max(PROBABILITY_FLOOR) * f64::from(count))
        .collect();

    let index = rng
        .choose_weighted(&weights)
        .unwrap_or_else(|| rng.gen_range_usize(0..values.len()));
    values[index].0
}
