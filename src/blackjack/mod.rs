//! Blackjack engine.
//!
//! One [`Blackjack`] serves one player session and runs at most one round at
//! a time. The round moves through [`RoundState`]:
//! `Betting → Dealing → Playing → DealerTurn → Finished → Betting`.
//! Every stake and payout goes through the session's [`Ledger`].

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::card::Card;
use crate::error::ActionError;
use crate::hand::Hand;
use crate::ledger::{Ledger, LedgerError};
use crate::options::BlackjackOptions;
use crate::result::RoundResult;
use crate::sync::{self, Mutex};

mod actions;
mod bet;
pub mod deal;
mod dealer;
pub mod state;

pub use deal::{Favor, InitialDeal, biased_deal, straight_deal};
pub use state::{DealerStep, RoundState, Seat};

/// A single-player blackjack table backed by a remote balance.
///
/// The deck for a round is built and shuffled when the stake is chosen, so
/// tests can rig it between [`Blackjack::place_bet`] and [`Blackjack::deal`].
pub struct Blackjack<L> {
    /// Cards left for the current round. The top of the deck is the end.
    pub deck: Mutex<Vec<Card>>,
    /// Table options.
    pub options: BlackjackOptions,
    /// Current round state.
    pub state: Mutex<RoundState>,
    user_id: String,
    ledger: L,
    /// Stake for the current round, doubled on a double-down.
    bet: Mutex<u64>,
    player_hand: Mutex<Hand>,
    dealer_hand: Mutex<Hand>,
    result: Mutex<Option<RoundResult>>,
    rng: Mutex<ChaCha8Rng>,
}

impl<L: Ledger> Blackjack<L> {
    /// Creates a table for `user_id` with the given seed.
    ///
    /// # Example
    ///
    /// ```
    /// use casino_core::{Blackjack, BlackjackOptions, InMemoryLedger, RoundState};
    ///
    /// let ledger = InMemoryLedger::new();
    /// ledger.open_account("alice", 100);
    /// let table = Blackjack::new(BlackjackOptions::default(), ledger, "alice", 42);
    /// assert_eq!(table.state(), RoundState::Betting);
    /// ```
    #[must_use]
    pub fn new(options: BlackjackOptions, ledger: L, user_id: impl Into<String>, seed: u64) -> Self {
        Self {
            deck: Mutex::new(Vec::new()),
            options,
            state: Mutex::new(RoundState::Betting),
            user_id: user_id.into(),
            ledger,
            bet: Mutex::new(0),
            player_hand: Mutex::new(Hand::new()),
            dealer_hand: Mutex::new(Hand::new()),
            result: Mutex::new(None),
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Draws a card from the top of the deck.
    fn draw(&self) -> Option<Card> {
        self.deck.lock().pop()
    }

    fn set_state(&self, next: RoundState) {
        let previous = sync::replace(&self.state, next);
        debug!(user_id = %self.user_id, ?previous, ?next, "blackjack state change");
    }

    fn finish(&self, result: RoundResult) {
        *self.result.lock() = Some(result);
        self.set_state(RoundState::Finished);
    }

    /// Returns the current round state.
    pub fn state(&self) -> RoundState {
        *self.state.lock()
    }

    /// Returns the current stake (zero before one is chosen).
    pub fn bet(&self) -> u64 {
        *self.bet.lock()
    }

    /// Returns a copy of the player's hand.
    pub fn player_hand(&self) -> Hand {
        self.player_hand.lock().clone()
    }

    /// Returns a copy of the dealer's hand.
    pub fn dealer_hand(&self) -> Hand {
        self.dealer_hand.lock().clone()
    }

    /// Returns the dealer's face-up card.
    pub fn dealer_up_card(&self) -> Option<Card> {
        self.dealer_hand.lock().cards().first().copied()
    }

    /// Dealer value the player is allowed to see.
    ///
    /// Only the up card counts until the dealer's turn begins.
    pub fn dealer_visible_value(&self) -> u8 {
        match self.state() {
            RoundState::DealerTurn | RoundState::Finished => self.dealer_hand.lock().value(),
            _ => self.dealer_up_card().map_or(0, |card| card.value()),
        }
    }

    /// Returns the settled result once the round is finished.
    pub fn result(&self) -> Option<RoundResult> {
        *self.result.lock()
    }

    /// Returns the number of cards left in the deck.
    pub fn cards_remaining(&self) -> usize {
        self.deck.lock().len()
    }

    /// Returns whether double-down is currently offered, ignoring funds.
    pub fn can_double(&self) -> bool {
        self.state() == RoundState::Playing && self.player_hand.lock().len() == 2
    }

    /// Returns the session's user id.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns the ledger backing this table.
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Reads the authoritative balance.
    ///
    /// # Errors
    ///
    /// Returns any ledger error.
    pub fn balance(&self) -> Result<u64, LedgerError> {
        self.ledger.balance(&self.user_id)
    }

    /// Clears the finished round and returns to betting.
    ///
    /// Calling this while already betting is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is still in progress.
    pub fn reset(&self) -> Result<(), ActionError> {
        match self.state() {
            RoundState::Betting => return Ok(()),
            RoundState::Finished => {}
            _ => return Err(ActionError::InvalidState),
        }

        self.deck.lock().clear();
        self.player_hand.lock().clear();
        self.dealer_hand.lock().clear();
        *self.bet.lock() = 0;
        *self.result.lock() = None;
        self.set_state(RoundState::Betting);
        Ok(())
    }
}
