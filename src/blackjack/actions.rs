use tracing::{debug, info, warn};

use crate::card::Card;
use crate::error::ActionError;
use crate::ledger::{self, Ledger, LedgerError, TransactionKind};
use crate::result::{RoundOutcome, RoundResult};

use super::{Blackjack, RoundState};

impl<L: Ledger> Blackjack<L> {
    fn ensure_playing(&self) -> Result<(), ActionError> {
        if self.state() != RoundState::Playing {
            return Err(ActionError::InvalidState);
        }
        Ok(())
    }

    /// Ends the round as a bust loss. The stake was taken at deal time, so
    /// nothing further touches the ledger.
    fn finish_bust(&self) {
        let result = RoundResult {
            outcome: RoundOutcome::Bust,
            bet: self.bet(),
            payout: 0,
            player_value: self.player_hand.lock().value(),
            dealer_value: self.dealer_hand.lock().value(),
        };
        info!(user_id = %self.user_id, bet = result.bet, "blackjack player bust");
        self.finish(result);
    }

    /// Player action: Hit (draw a card).
    ///
    /// Going over 21 finishes the round as a bust.
    ///
    /// # Errors
    ///
    /// Returns an error if the player is not on turn or the deck is empty.
    pub fn hit(&self) -> Result<Card, ActionError> {
        self.ensure_playing()?;

        let card = self.draw().ok_or(ActionError::NoCards)?;
        let mut hand = self.player_hand.lock();
        hand.add_card(card);
        let bust = hand.is_bust();
        drop(hand);

        if bust {
            self.finish_bust();
        }

        Ok(card)
    }

    /// Player action: Stand (hand over to the dealer).
    ///
    /// # Errors
    ///
    /// Returns an error if the player is not on turn.
    pub fn stand(&self) -> Result<(), ActionError> {
        self.ensure_playing()?;
        self.set_state(RoundState::DealerTurn);
        Ok(())
    }

    /// Player action: Double down (match the stake, take exactly one card).
    ///
    /// The balance is re-read before the second stake is debited. Unless the
    /// card busts the hand, the dealer plays next.
    ///
    /// # Errors
    ///
    /// Returns an error if the player is not on turn, the hand does not hold
    /// exactly two cards, the balance does not cover the extra stake, the
    /// deck is empty, or the ledger fails. No state changes on error.
    pub fn double_down(&self) -> Result<Card, ActionError> {
        self.ensure_playing()?;

        if self.player_hand.lock().len() != 2 {
            return Err(ActionError::CannotDouble);
        }
        if self.cards_remaining() == 0 {
            return Err(ActionError::NoCards);
        }

        let bet = self.bet();
        if self.ledger.balance(&self.user_id)? < bet {
            return Err(ActionError::InsufficientFunds);
        }

        ledger::charge(
            &self.ledger,
            &self.user_id,
            bet,
            TransactionKind::Blackjack,
            "Blackjack double down",
        )
        .map_err(|err| match err {
            LedgerError::InsufficientFunds { .. } => ActionError::InsufficientFunds,
            other => {
                warn!(user_id = %self.user_id, error = %other, "double-down debit failed");
                ActionError::Ledger(other)
            }
        })?;

        *self.bet.lock() = bet * 2;
        let card = self.draw().ok_or(ActionError::NoCards)?;
        let mut hand = self.player_hand.lock();
        hand.add_card(card);
        let bust = hand.is_bust();
        drop(hand);
        debug!(user_id = %self.user_id, bet = bet * 2, "blackjack double down");

        if bust {
            self.finish_bust();
        } else {
            self.set_state(RoundState::DealerTurn);
        }

        Ok(card)
    }
}
