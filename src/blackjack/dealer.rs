use alloc::vec::Vec;

use tracing::info;

use crate::card::Card;
use crate::error::SettleError;
use crate::ledger::{self, Ledger};
use crate::options::RoundingMode;
use crate::result::{RoundOutcome, RoundResult};
use crate::sequence::{Pacer, Sequencer};
use crate::sound::SoundCue;

use super::{Blackjack, DealerStep, RoundState};

#[cfg(feature = "std")]
fn round_amount(amount: f64, mode: RoundingMode) -> u64 {
    match mode {
        RoundingMode::Up => amount.ceil() as u64,
        RoundingMode::Down => amount.floor() as u64,
        RoundingMode::Nearest => amount.round() as u64,
    }
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn round_amount(amount: f64, mode: RoundingMode) -> u64 {
    match mode {
        RoundingMode::Up => libm::ceil(amount) as u64,
        RoundingMode::Down => libm::floor(amount) as u64,
        RoundingMode::Nearest => libm::round(amount) as u64,
    }
}

/// Compares final totals. The player's hand is known not to be bust.
const fn compare(player_value: u8, dealer_value: u8) -> RoundOutcome {
    if dealer_value > 21 {
        RoundOutcome::DealerBust
    } else if dealer_value > player_value {
        RoundOutcome::Lose
    } else if player_value > dealer_value {
        RoundOutcome::Win
    } else {
        RoundOutcome::Push
    }
}

impl<L: Ledger> Blackjack<L> {
    /// Winnings on `bet` at `ratio`, rounded per the table's rounding mode.
    pub(super) fn round_payout(&self, bet: u64, ratio: f64) -> u64 {
        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for monetary values"
        )]
        let amount = bet as f64 * ratio;
        round_amount(amount, self.options.rounding_blackjack)
    }

    /// Plays one dealer step.
    ///
    /// The dealer draws while below `dealer_stands_on`; a soft total counts
    /// at face value, so soft 17 stands. Once the dealer stands the round is
    /// compared and paid: a win returns twice the stake, a push returns the
    /// stake, a loss pays nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the dealer's turn, the deck runs out,
    /// or the payout fails (the state then stays `DealerTurn` and the next
    /// call retries the settlement).
    pub fn dealer_step(&self) -> Result<DealerStep, SettleError> {
        if self.state() != RoundState::DealerTurn {
            return Err(SettleError::InvalidState);
        }

        if self.dealer_hand.lock().value() < self.options.dealer_stands_on {
            let card = self.draw().ok_or(SettleError::NoCards)?;
            self.dealer_hand.lock().add_card(card);
            return Ok(DealerStep::Drew(card));
        }

        self.settle().map(DealerStep::Settled)
    }

    /// Runs the dealer's turn to completion without pacing.
    ///
    /// Returns the cards the dealer drew and the settled result.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Blackjack::dealer_step`].
    pub fn dealer_play(&self) -> Result<(Vec<Card>, RoundResult), SettleError> {
        let mut drawn = Vec::new();
        loop {
            match self.dealer_step()? {
                DealerStep::Drew(card) => drawn.push(card),
                DealerStep::Settled(result) => return Ok((drawn, result)),
            }
        }
    }

    /// Runs the dealer's turn with a pause before each step.
    ///
    /// `on_draw` is called for every card the dealer takes. Returns `None`
    /// if the sequence was cancelled; no step runs after cancellation.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Blackjack::dealer_step`].
    pub fn play_dealer<P: Pacer>(
        &self,
        sequencer: &mut Sequencer<'_, P>,
        mut on_draw: impl FnMut(Card),
    ) -> Result<Option<RoundResult>, SettleError> {
        if self.state() != RoundState::DealerTurn {
            return Err(SettleError::InvalidState);
        }
        // Hole card turns over first.
        if !sequencer.step(self.options.timing.card_reveal, Some(SoundCue::CardFlip)) {
            return Ok(None);
        }

        loop {
            if !sequencer.step(self.options.timing.dealer_draw, None) {
                return Ok(None);
            }
            match self.dealer_step()? {
                DealerStep::Drew(card) => {
                    sequencer.cue(SoundCue::CardDeal);
                    on_draw(card);
                }
                DealerStep::Settled(result) => {
                    sequencer.cue(result.outcome.cue());
                    return Ok(Some(result));
                }
            }
        }
    }

    fn settle(&self) -> Result<RoundResult, SettleError> {
        let bet = self.bet();
        let player_value = self.player_hand.lock().value();
        let dealer_value = self.dealer_hand.lock().value();
        let outcome = compare(player_value, dealer_value);

        let payout = match outcome {
            RoundOutcome::Win | RoundOutcome::DealerBust | RoundOutcome::Blackjack => bet * 2,
            RoundOutcome::Push => bet,
            RoundOutcome::Lose | RoundOutcome::Bust => 0,
        };

        if let Some(kind) = outcome.payout_kind() {
            let description = if outcome == RoundOutcome::Push {
                "Blackjack push refund"
            } else {
                "Blackjack win"
            };
            ledger::pay(&self.ledger, &self.user_id, payout, kind, description)?;
        }

        let result = RoundResult {
            outcome,
            bet,
            payout,
            player_value,
            dealer_value,
        };
        info!(
            user_id = %self.user_id,
            bet,
            payout,
            player_value,
            dealer_value,
            ?outcome,
            "blackjack round settled"
        );
        self.finish(result);

        Ok(result)
    }
}
