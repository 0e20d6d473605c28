//! Blackjack and roulette engines with house-weighted outcomes and a
//! pluggable balance ledger, with optional `no_std` support.
//!
//! The crate provides a [`Blackjack`] table and a [`Roulette`] table. Each
//! serves one player session, validates every action against its state
//! machine, and moves money through a [`Ledger`] that holds the
//! authoritative balance.
//!
//! # Example
//!
//! ```
//! use casino_core::{BetKind, InMemoryLedger, Roulette, RouletteOptions};
//!
//! let ledger = InMemoryLedger::new();
//! ledger.open_account("alice", 100);
//!
//! let table = Roulette::new(RouletteOptions::default(), &ledger, "alice", 42);
//! table.place_bet(BetKind::Red, 10).unwrap();
//! table.spin().unwrap();
//! let result = table.complete_spin().unwrap();
//! assert_eq!(ledger.balance_of("alice"), Some(90 + result.winnings));
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod blackjack;
pub mod card;
pub mod error;
pub mod hand;
pub mod ledger;
pub mod options;
pub mod result;
pub mod roulette;
pub mod sequence;
pub mod sound;
mod sync;

// Re-export main types
pub use blackjack::{Blackjack, DealerStep, Favor, InitialDeal, RoundState, Seat};
pub use card::{Card, DECK_SIZE, Suit};
pub use error::{ActionError, BetError, DealError, RouletteBetError, SettleError, SpinError};
pub use hand::{Hand, hand_value};
pub use ledger::{InMemoryLedger, Ledger, LedgerError, Transaction, TransactionKind};
pub use options::{BlackjackOptions, DealMode, RouletteOptions, RoundingMode, Timing};
pub use result::{RoundOutcome, RoundResult, SpinResult};
pub use roulette::{BetKind, BetSlip, Color, PlacedBet, Roulette, SpinStart, WheelState};
pub use sequence::{CancelToken, Immediate, Pacer, Sequencer};
#[cfg(feature = "std")]
pub use sequence::ThreadPacer;
pub use sound::{SilentSink, SoundCue, SoundSink};
