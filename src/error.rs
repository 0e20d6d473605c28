//! Error types for engine operations.

use thiserror::Error;

use crate::ledger::LedgerError;

/// Errors that can occur when choosing a blackjack stake.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BetError {
    /// Invalid game state for betting.
    #[error("invalid game state for betting")]
    InvalidState,
    /// Bet amount is zero.
    #[error("bet amount is zero")]
    ZeroBet,
    /// Bet amount is not one of the table's chips.
    #[error("bet amount {0} is not an available chip")]
    NotAChip(u64),
    /// Insufficient funds.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// The balance could not be read.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Errors that can occur while dealing or revealing the initial hands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DealError {
    /// Invalid game state for dealing.
    #[error("invalid game state for dealing")]
    InvalidState,
    /// No stake has been chosen.
    #[error("no bet has been placed")]
    NoBet,
    /// Insufficient funds at debit time.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// Not enough cards in the deck.
    #[error("not enough cards in the deck")]
    NotEnoughCards,
    /// The debit or its transaction log failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid game state for this action.
    #[error("invalid game state for this action")]
    InvalidState,
    /// Cannot double down on this hand.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// Insufficient funds for this action.
    #[error("insufficient funds for this action")]
    InsufficientFunds,
    /// No cards left in the deck.
    #[error("no cards left in the deck")]
    NoCards,
    /// A ledger call failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Errors that can occur while the dealer plays out and the round settles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettleError {
    /// Invalid game state for settlement.
    #[error("invalid game state for settlement")]
    InvalidState,
    /// No cards left in the deck.
    #[error("no cards left in the deck")]
    NoCards,
    /// The payout credit or its transaction log failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Errors that can occur when placing or clearing roulette bets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouletteBetError {
    /// The table is switched off.
    #[error("roulette is disabled")]
    Disabled,
    /// A spin is in progress.
    #[error("a spin is in progress")]
    Spinning,
    /// The bet target is out of range.
    #[error("invalid bet")]
    InvalidBet,
    /// Bet amount is zero.
    #[error("bet amount is zero")]
    ZeroBet,
    /// The total staked would exceed the table maximum.
    #[error("total stake would exceed the maximum of {maximum}")]
    AboveMaximum {
        /// Table maximum.
        maximum: u64,
    },
    /// The total staked would exceed the balance.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// A winning spin could not be paid in whole currency units.
    #[error("bet is too large to be paid out")]
    PayoutOverflow,
    /// The balance could not be read.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Errors that can occur when spinning the wheel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpinError {
    /// The table is switched off.
    #[error("roulette is disabled")]
    Disabled,
    /// A spin is already in progress.
    #[error("a spin is already in progress")]
    Spinning,
    /// No spin is in progress.
    #[error("no spin is in progress")]
    NotSpinning,
    /// No bets are placed.
    #[error("no bets placed")]
    NoBets,
    /// The total staked is below the table minimum.
    #[error("total stake is below the minimum of {minimum}")]
    BelowMinimum {
        /// Table minimum.
        minimum: u64,
    },
    /// The authoritative balance no longer covers the stake.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// A ledger call failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
