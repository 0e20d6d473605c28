//! House-weighted outcome selection.
//!
//! Every spin first flips a coin weighted by the house edge. On the house
//! side the result is drawn from the numbers that beat every open bet; on
//! the player side it is drawn from the numbers that pay at least one.

extern crate alloc;

use alloc::vec::Vec;

use rand::Rng;
use rand::seq::IndexedRandom;

use super::bet::PlacedBet;
use super::wheel::MAX_NUMBER;

/// Which branch a spin took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Branch {
    /// The house-favored branch.
    House,
    /// The player-favored branch.
    Player,
}

/// Net result for the player if the ball lands on `outcome`: winning bets
/// count stake plus winnings, losing bets count their negative stake.
#[must_use]
pub fn net_payout(bets: &[PlacedBet], outcome: u8) -> i64 {
    bets.iter()
        .map(|bet| {
            let payout = bet.payout(outcome);
            if payout > 0 {
                i64::try_from(payout).unwrap_or(i64::MAX)
            } else {
                -i64::try_from(bet.amount).unwrap_or(i64::MAX)
            }
        })
        .sum()
}

/// The number with the smallest [`net_payout`]; the lowest such number on
/// ties.
#[must_use]
pub fn cheapest_outcome(bets: &[PlacedBet]) -> u8 {
    (0..=MAX_NUMBER)
        .min_by_key(|&outcome| net_payout(bets, outcome))
        .unwrap_or(0)
}

/// Numbers on which every bet loses.
#[must_use]
pub fn losing_numbers(bets: &[PlacedBet]) -> Vec<u8> {
    (0..=MAX_NUMBER)
        .filter(|&outcome| bets.iter().all(|bet| !bet.kind.wins(outcome)))
        .collect()
}

/// Numbers on which at least one bet wins.
#[must_use]
pub fn winning_numbers(bets: &[PlacedBet]) -> Vec<u8> {
    (0..=MAX_NUMBER)
        .filter(|&outcome| bets.iter().any(|bet| bet.kind.wins(outcome)))
        .collect()
}

/// Flips the house-edge coin. `house_edge` is a percentage.
pub(crate) fn pick_branch<R: Rng + ?Sized>(house_edge: f64, rng: &mut R) -> Branch {
    let p = if house_edge.is_nan() {
        0.0
    } else {
        (house_edge / 100.0).clamp(0.0, 1.0)
    };
    if rng.random_bool(p) {
        Branch::House
    } else {
        Branch::Player
    }
}

/// Chooses the winning number for a spin given the open bets.
///
/// With `house_edge` at 100 and any bet open, the result beats every bet
/// whenever such a number exists, and otherwise minimizes the payout. At
/// 0 the result pays at least one open bet. With no bets the draw is
/// uniform over the wheel.
pub fn select_outcome<R: Rng + ?Sized>(bets: &[PlacedBet], house_edge: f64, rng: &mut R) -> u8 {
    if pick_branch(house_edge, rng) == Branch::House && !bets.is_empty() {
        return losing_numbers(bets)
            .choose(rng)
            .copied()
            .unwrap_or_else(|| cheapest_outcome(bets));
    }

    match winning_numbers(bets).choose(rng) {
        Some(&outcome) => outcome,
        None => rng.random_range(0..=MAX_NUMBER),
    }
}
