use rand::Rng;
use tracing::{debug, info, warn};

use crate::card::{Card, shuffled_deck};
use crate::error::{BetError, DealError};
use crate::hand::Hand;
use crate::ledger::{self, Ledger, LedgerError, TransactionKind};
use crate::options::DealMode;
use crate::result::{RoundOutcome, RoundResult};
use crate::sequence::{Pacer, Sequencer};
use crate::sound::SoundCue;

use super::deal::{Favor, InitialDeal, biased_deal, straight_deal};
use super::{Blackjack, RoundState, Seat};

impl<L: Ledger> Blackjack<L> {
    /// Chooses the stake for the next round and prepares a fresh deck.
    ///
    /// Choosing again before dealing replaces the stake. Nothing is debited
    /// until [`Blackjack::deal`].
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not taking bets, the amount is zero
    /// or not a chip, the balance does not cover it, or the balance cannot
    /// be read.
    pub fn place_bet(&self, amount: u64) -> Result<(), BetError> {
        if self.state() != RoundState::Betting {
            return Err(BetError::InvalidState);
        }
        if amount == 0 {
            return Err(BetError::ZeroBet);
        }
        if !self.options.is_chip(amount) {
            return Err(BetError::NotAChip(amount));
        }

        let balance = self.ledger.balance(&self.user_id)?;
        if balance < amount {
            return Err(BetError::InsufficientFunds);
        }

        let deck = shuffled_deck(&mut *self.rng.lock());
        *self.deck.lock() = deck;
        *self.bet.lock() = amount;
        debug!(user_id = %self.user_id, amount, "blackjack stake chosen");

        Ok(())
    }

    fn pick_favor(&self) -> Option<Favor> {
        match self.options.deal_mode {
            DealMode::Straight => None,
            DealMode::Biased { house_probability } => {
                let p = if house_probability.is_nan() {
                    0.0
                } else {
                    house_probability.clamp(0.0, 1.0)
                };
                if self.rng.lock().random_bool(p) {
                    Some(Favor::House)
                } else {
                    Some(Favor::Player)
                }
            }
        }
    }

    /// Takes the stake and deals both starting hands.
    ///
    /// The balance is re-read and debited, a `blackjack` transaction is
    /// logged, and the four cards are returned for the timed reveal. Call
    /// [`Blackjack::finish_deal`] once they have been shown.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not taking bets, no stake was chosen,
    /// the deck is short, the balance no longer covers the stake, or the
    /// ledger fails. The state stays `Betting` on every error.
    pub fn deal(&self) -> Result<InitialDeal, DealError> {
        if self.state() != RoundState::Betting {
            return Err(DealError::InvalidState);
        }

        let bet = self.bet();
        if bet == 0 {
            return Err(DealError::NoBet);
        }
        if self.cards_remaining() < 4 {
            return Err(DealError::NotEnoughCards);
        }

        ledger::charge(
            &self.ledger,
            &self.user_id,
            bet,
            TransactionKind::Blackjack,
            "Blackjack bet",
        )
        .map_err(|err| match err {
            LedgerError::InsufficientFunds { .. } => DealError::InsufficientFunds,
            other => {
                warn!(user_id = %self.user_id, error = %other, "blackjack stake debit failed");
                DealError::Ledger(other)
            }
        })?;

        let favor = self.pick_favor();
        let mut deck = self.deck.lock();
        let initial = match favor {
            Some(favor) => biased_deal(&mut deck, favor),
            None => straight_deal(&mut deck),
        };
        drop(deck);
        let Some(initial) = initial else {
            // Unreachable after the length check; hand the stake back anyway.
            ledger::pay(
                &self.ledger,
                &self.user_id,
                bet,
                TransactionKind::BlackjackRefund,
                "Blackjack deal aborted",
            )?;
            return Err(DealError::NotEnoughCards);
        };

        *self.player_hand.lock() = Hand::from_cards(&initial.player);
        *self.dealer_hand.lock() = Hand::from_cards(&initial.dealer);
        debug!(user_id = %self.user_id, bet, ?favor, "blackjack hands dealt");
        self.set_state(RoundState::Dealing);

        Ok(initial)
    }

    /// Ends the reveal and checks the player's hand for a natural.
    ///
    /// A natural is paid immediately at `blackjack_pays` and the round
    /// finishes; otherwise play begins. Returns the result when the round
    /// finished here.
    ///
    /// # Errors
    ///
    /// Returns an error if no deal is being revealed, or if paying a natural
    /// fails (the state then stays `Dealing` and the call may be retried).
    pub fn finish_deal(&self) -> Result<Option<RoundResult>, DealError> {
        if self.state() != RoundState::Dealing {
            return Err(DealError::InvalidState);
        }

        let player = self.player_hand();
        if !player.is_natural() {
            self.set_state(RoundState::Playing);
            return Ok(None);
        }

        let bet = self.bet();
        let winnings = self.round_payout(bet, self.options.blackjack_pays);
        let payout = bet + winnings;
        ledger::pay(
            &self.ledger,
            &self.user_id,
            payout,
            TransactionKind::BlackjackWin,
            "Blackjack win",
        )?;

        let result = RoundResult {
            outcome: RoundOutcome::Blackjack,
            bet,
            payout,
            player_value: player.value(),
            dealer_value: self.dealer_hand.lock().value(),
        };
        info!(user_id = %self.user_id, bet, payout, "blackjack natural paid");
        self.finish(result);

        Ok(Some(result))
    }

    /// Reveals the dealt cards one by one, then calls
    /// [`Blackjack::finish_deal`].
    ///
    /// `on_reveal` is called as each card turns up. Returns `None` if the
    /// sequence was cancelled, leaving the round in `Dealing`.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Blackjack::finish_deal`].
    pub fn reveal_initial<P: Pacer>(
        &self,
        sequencer: &mut Sequencer<'_, P>,
        mut on_reveal: impl FnMut(Seat, Card),
    ) -> Result<Option<RoundState>, DealError> {
        if self.state() != RoundState::Dealing {
            return Err(DealError::InvalidState);
        }

        let player = self.player_hand();
        let dealer = self.dealer_hand();
        let order = player
            .cards()
            .iter()
            .zip(dealer.cards())
            .flat_map(|(p, d)| [(Seat::Player, *p), (Seat::Dealer, *d)]);

        for (seat, card) in order {
            if !sequencer.step(self.options.timing.card_reveal, Some(SoundCue::CardDeal)) {
                return Ok(None);
            }
            on_reveal(seat, card);
        }

        if sequencer.is_cancelled() {
            return Ok(None);
        }
        if let Some(result) = self.finish_deal()? {
            sequencer.cue(result.outcome.cue());
        }
        Ok(Some(self.state()))
    }
}
