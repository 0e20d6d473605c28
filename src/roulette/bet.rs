//! Bet kinds and the per-spin bet slip.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use super::wheel::{MAX_NUMBER, is_red};

/// What a roulette bet covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value", rename_all = "snake_case"))]
pub enum BetKind {
    /// A single number, 0 to 36.
    Straight(u8),
    /// Any red number.
    Red,
    /// Any black number.
    Black,
    /// Any even number except 0.
    Even,
    /// Any odd number.
    Odd,
    /// 1 to 18.
    Low,
    /// 19 to 36.
    High,
    /// 1-12, 13-24 or 25-36, numbered 1 to 3.
    Dozen(u8),
    /// One of the three table columns, numbered 1 to 3.
    Column(u8),
}

impl BetKind {
    /// Returns whether the bet's target is in range.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        match *self {
            Self::Straight(number) => number <= MAX_NUMBER,
            Self::Dozen(which) | Self::Column(which) => matches!(which, 1..=3),
            Self::Red | Self::Black | Self::Even | Self::Odd | Self::Low | Self::High => true,
        }
    }

    /// Returns whether the bet wins when the ball lands on `outcome`.
    ///
    /// Zero wins only a straight bet on zero.
    #[must_use]
    pub const fn wins(&self, outcome: u8) -> bool {
        if outcome > MAX_NUMBER {
            return false;
        }
        if outcome == 0 {
            return matches!(self, Self::Straight(0));
        }

        match *self {
            Self::Straight(number) => number == outcome,
            Self::Red => is_red(outcome),
            Self::Black => !is_red(outcome),
            Self::Even => outcome % 2 == 0,
            Self::Odd => outcome % 2 == 1,
            Self::Low => outcome <= 18,
            Self::High => outcome >= 19,
            Self::Dozen(which) => (outcome - 1) / 12 + 1 == which,
            Self::Column(which) => (outcome - 1) % 3 + 1 == which,
        }
    }

    /// Winnings multiplier, excluding the returned stake.
    #[must_use]
    pub const fn multiplier(&self) -> u64 {
        match self {
            Self::Straight(_) => 35,
            Self::Dozen(_) | Self::Column(_) => 2,
            Self::Red | Self::Black | Self::Even | Self::Odd | Self::Low | Self::High => 1,
        }
    }

    /// Stake plus winnings if the bet wins, or `None` if that overflows.
    #[must_use]
    pub const fn winning_return(&self, amount: u64) -> Option<u64> {
        amount.checked_mul(self.multiplier() + 1)
    }

    /// Amount returned for a bet of `amount` on `outcome`: stake plus
    /// winnings when it wins, nothing otherwise.
    ///
    /// Saturates at `u64::MAX`; the engine refuses bets that could get there.
    #[must_use]
    pub const fn payout(&self, amount: u64, outcome: u8) -> u64 {
        if self.wins(outcome) {
            amount.saturating_mul(self.multiplier() + 1)
        } else {
            0
        }
    }
}

impl fmt::Display for BetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Straight(number) => write!(f, "{number}"),
            Self::Red => f.write_str("Red"),
            Self::Black => f.write_str("Black"),
            Self::Even => f.write_str("Even"),
            Self::Odd => f.write_str("Odd"),
            Self::Low => f.write_str("1-18"),
            Self::High => f.write_str("19-36"),
            Self::Dozen(1) => f.write_str("1st 12"),
            Self::Dozen(2) => f.write_str("2nd 12"),
            Self::Dozen(3) => f.write_str("3rd 12"),
            Self::Dozen(which) => write!(f, "Dozen {which}"),
            Self::Column(which) => write!(f, "Column {which}"),
        }
    }
}

/// A bet on the table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedBet {
    /// What the bet covers.
    pub kind: BetKind,
    /// Amount staked.
    pub amount: u64,
    /// Display label.
    pub label: String,
}

impl PlacedBet {
    /// Creates a bet labelled from its kind.
    #[must_use]
    pub fn new(kind: BetKind, amount: u64) -> Self {
        Self {
            kind,
            amount,
            label: kind.to_string(),
        }
    }

    /// Amount returned if the ball lands on `outcome`.
    #[must_use]
    pub const fn payout(&self, outcome: u8) -> u64 {
        self.kind.payout(self.amount, outcome)
    }
}

/// Open bets for one spin.
///
/// Never holds two entries of the same kind: placing a kind again adds to
/// the existing stake.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BetSlip {
    bets: Vec<PlacedBet>,
}

impl BetSlip {
    /// Creates an empty slip.
    #[must_use]
    pub const fn new() -> Self {
        Self { bets: Vec::new() }
    }

    /// Adds `amount` on `kind`, merging with an existing bet of that kind.
    pub fn place(&mut self, kind: BetKind, amount: u64) {
        match self.bets.iter_mut().find(|bet| bet.kind == kind) {
            Some(bet) => bet.amount = bet.amount.saturating_add(amount),
            None => self.bets.push(PlacedBet::new(kind, amount)),
        }
    }

    /// Removes every bet.
    pub fn clear(&mut self) {
        self.bets.clear();
    }

    /// Returns the open bets.
    #[must_use]
    pub fn bets(&self) -> &[PlacedBet] {
        &self.bets
    }

    /// Sum of all stakes.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bets
            .iter()
            .fold(0, |sum, bet| sum.saturating_add(bet.amount))
    }

    /// What the slip returns if every bet wins at once, or `None` if that
    /// does not fit in a `u64`. Bounds [`BetSlip::winnings`] for any outcome.
    #[must_use]
    pub fn max_return(&self) -> Option<u64> {
        self.bets.iter().try_fold(0u64, |sum, bet| {
            sum.checked_add(bet.kind.winning_return(bet.amount)?)
        })
    }

    /// Returns the number of distinct bets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bets.len()
    }

    /// Returns whether no bet is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bets.is_empty()
    }

    /// Total returned if the ball lands on `outcome`.
    #[must_use]
    pub fn winnings(&self, outcome: u8) -> u64 {
        self.bets
            .iter()
            .fold(0, |sum, bet| sum.saturating_add(bet.payout(outcome)))
    }

    /// The bets that win on `outcome`.
    #[must_use]
    pub fn winning_bets(&self, outcome: u8) -> Vec<PlacedBet> {
        self.bets
            .iter()
            .filter(|bet| bet.kind.wins(outcome))
            .cloned()
            .collect()
    }
}
