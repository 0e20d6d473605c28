//! Settled outcome types.

extern crate alloc;

use alloc::vec::Vec;

use crate::ledger::TransactionKind;
use crate::roulette::{Color, PlacedBet};
use crate::sound::SoundCue;

/// How a blackjack round ended for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundOutcome {
    /// Two-card 21, resolved before any action.
    Blackjack,
    /// Player finished higher than the dealer.
    Win,
    /// Dealer went over 21.
    DealerBust,
    /// Dealer finished higher than the player.
    Lose,
    /// Player went over 21.
    Bust,
    /// Equal totals; stake returned.
    Push,
}

impl RoundOutcome {
    /// Text shown once the round is over.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Blackjack => "Blackjack! You win!",
            Self::Win => "You win!",
            Self::DealerBust => "Dealer busts! You win!",
            Self::Lose => "Dealer wins.",
            Self::Bust => "Bust! You lose.",
            Self::Push => "Push. Your bet is returned.",
        }
    }

    /// Returns whether the player is paid more than the stake.
    #[must_use]
    pub const fn is_win(&self) -> bool {
        matches!(self, Self::Blackjack | Self::Win | Self::DealerBust)
    }

    /// Transaction type for the payout, if any is paid.
    #[must_use]
    pub const fn payout_kind(&self) -> Option<TransactionKind> {
        match self {
            Self::Blackjack | Self::Win | Self::DealerBust => Some(TransactionKind::BlackjackWin),
            Self::Push => Some(TransactionKind::BlackjackRefund),
            Self::Lose | Self::Bust => None,
        }
    }

    /// Cue played when the outcome is shown.
    #[must_use]
    pub const fn cue(&self) -> SoundCue {
        match self {
            Self::Blackjack => SoundCue::Blackjack,
            Self::Win | Self::DealerBust => SoundCue::Win,
            Self::Lose | Self::Bust => SoundCue::Lose,
            Self::Push => SoundCue::Push,
        }
    }
}

/// Result of a settled blackjack round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    /// The outcome.
    pub outcome: RoundOutcome,
    /// Total staked, including a double-down.
    pub bet: u64,
    /// Amount credited back (stake included). Zero on a loss.
    pub payout: u64,
    /// Player's final hand value.
    pub player_value: u8,
    /// Dealer's final hand value.
    pub dealer_value: u8,
}

impl RoundResult {
    /// Net change to the balance over the whole round.
    #[must_use]
    pub fn net(&self) -> i64 {
        let payout = i64::try_from(self.payout).unwrap_or(i64::MAX);
        let bet = i64::try_from(self.bet).unwrap_or(i64::MAX);
        payout - bet
    }
}

/// Result of a settled roulette spin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinResult {
    /// The winning number.
    pub outcome: u8,
    /// Color of the winning number.
    pub color: Color,
    /// Total staked on the spin.
    pub total_stake: u64,
    /// Amount credited back (stakes of winning bets included).
    pub winnings: u64,
    /// The bets that won.
    pub winning_bets: Vec<PlacedBet>,
}

impl SpinResult {
    /// Net change to the balance over the spin.
    #[must_use]
    pub fn net(&self) -> i64 {
        let winnings = i64::try_from(self.winnings).unwrap_or(i64::MAX);
        let stake = i64::try_from(self.total_stake).unwrap_or(i64::MAX);
        winnings - stake
    }

    /// Cue played when the result is shown.
    #[must_use]
    pub const fn cue(&self) -> SoundCue {
        if self.winnings > 0 {
            SoundCue::Win
        } else {
            SoundCue::Lose
        }
    }
}
