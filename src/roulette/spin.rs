use tracing::{debug, info, warn};

use crate::error::{RouletteBetError, SpinError};
use crate::ledger::{self, Ledger, LedgerError, TransactionKind};
use crate::result::SpinResult;
use crate::sequence::{Pacer, Sequencer};
use crate::sound::SoundCue;

use super::bet::BetKind;
use super::selection::select_outcome;
use super::wheel::{color_of, pocket_index, target_rotation};
use super::{PendingSpin, Roulette, SpinStart, WheelState};

impl<L: Ledger> Roulette<L> {
    fn ensure_open_for_bets(&self) -> Result<(), RouletteBetError> {
        match self.state() {
            WheelState::Open => Ok(()),
            WheelState::Spinning => Err(RouletteBetError::Spinning),
            WheelState::Disabled => Err(RouletteBetError::Disabled),
        }
    }

    /// Places `amount` on `kind`, adding to an existing bet of the same kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is disabled or spinning, the bet is out
    /// of range or zero, the new total would exceed the table maximum or the
    /// balance, a win could not be paid without overflow, or the balance
    /// cannot be read.
    pub fn place_bet(&self, kind: BetKind, amount: u64) -> Result<(), RouletteBetError> {
        self.ensure_open_for_bets()?;
        if !kind.is_valid() {
            return Err(RouletteBetError::InvalidBet);
        }
        if amount == 0 {
            return Err(RouletteBetError::ZeroBet);
        }

        let total = self.total_stake().saturating_add(amount);
        if total > self.options.max_bet {
            return Err(RouletteBetError::AboveMaximum {
                maximum: self.options.max_bet,
            });
        }
        let mut slip = self.slip.lock().clone();
        slip.place(kind, amount);
        if slip.max_return().is_none() {
            return Err(RouletteBetError::PayoutOverflow);
        }
        if total > self.ledger.balance(&self.user_id)? {
            return Err(RouletteBetError::InsufficientFunds);
        }

        *self.slip.lock() = slip;
        debug!(user_id = %self.user_id, %kind, amount, total, "roulette bet placed");
        Ok(())
    }

    /// Removes every open bet and the previous result.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is disabled or spinning.
    pub fn clear_bets(&self) -> Result<(), RouletteBetError> {
        self.ensure_open_for_bets()?;
        self.slip.lock().clear();
        *self.last_result.lock() = None;
        Ok(())
    }

    /// Takes the total stake and picks the winning number.
    ///
    /// The balance is re-read immediately before the debit, and a `roulette`
    /// transaction is logged. Bets stay locked until
    /// [`Roulette::complete_spin`].
    ///
    /// # Errors
    ///
    /// Returns an error if the table is disabled or already spinning, no
    /// bets are open, the total is below the table minimum, the balance no
    /// longer covers it, or the ledger fails. No state changes on error.
    pub fn spin(&self) -> Result<SpinStart, SpinError> {
        match self.state() {
            WheelState::Open => {}
            WheelState::Spinning => return Err(SpinError::Spinning),
            WheelState::Disabled => return Err(SpinError::Disabled),
        }

        let slip = self.slip.lock().clone();
        if slip.is_empty() {
            return Err(SpinError::NoBets);
        }
        let total = slip.total();
        if total < self.options.min_bet {
            return Err(SpinError::BelowMinimum {
                minimum: self.options.min_bet,
            });
        }

        if self.ledger.balance(&self.user_id)? < total {
            return Err(SpinError::InsufficientFunds);
        }
        ledger::charge(
            &self.ledger,
            &self.user_id,
            total,
            TransactionKind::Roulette,
            "Roulette bet",
        )
        .map_err(|err| match err {
            LedgerError::InsufficientFunds { .. } => SpinError::InsufficientFunds,
            other => {
                warn!(user_id = %self.user_id, error = %other, "roulette stake debit failed");
                SpinError::Ledger(other)
            }
        })?;

        let outcome = select_outcome(slip.bets(), self.options.house_edge, &mut *self.rng.lock());
        let mut rotation = self.rotation.lock();
        *rotation = target_rotation(outcome, *rotation, self.options.timing.full_rotations);
        let start = SpinStart {
            outcome,
            pocket_index: pocket_index(outcome).unwrap_or(0),
            rotation: *rotation,
        };
        drop(rotation);

        *self.pending.lock() = Some(PendingSpin { outcome, slip });
        *self.last_result.lock() = None;
        debug!(user_id = %self.user_id, total, "roulette spin started");
        self.set_state(WheelState::Spinning);

        Ok(start)
    }

    /// Settles the spin once the wheel has stopped.
    ///
    /// Winnings are credited and logged as `roulette_win`; a losing spin
    /// logs nothing further. The outcome is added to the history and the
    /// consumed bets are cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is disabled, no spin is in progress, or
    /// if the payout fails
    /// (the wheel then stays `Spinning` and the call may be retried).
    pub fn complete_spin(&self) -> Result<SpinResult, SpinError> {
        match self.state() {
            WheelState::Spinning => {}
            WheelState::Open => return Err(SpinError::NotSpinning),
            WheelState::Disabled => return Err(SpinError::Disabled),
        }
        let Some(pending) = self.pending.lock().clone() else {
            return Err(SpinError::NotSpinning);
        };

        let outcome = pending.outcome;
        let winnings = pending.slip.winnings(outcome);
        if winnings > 0 {
            ledger::pay(
                &self.ledger,
                &self.user_id,
                winnings,
                TransactionKind::RouletteWin,
                "Roulette win",
            )?;
        }

        let result = SpinResult {
            outcome,
            color: color_of(outcome),
            total_stake: pending.slip.total(),
            winnings,
            winning_bets: pending.slip.winning_bets(outcome),
        };

        let mut history = self.history.lock();
        history.push_front(outcome);
        history.truncate(self.options.history_len);
        drop(history);

        self.slip.lock().clear();
        *self.pending.lock() = None;
        *self.last_result.lock() = Some(result.clone());
        info!(
            user_id = %self.user_id,
            outcome,
            stake = result.total_stake,
            winnings,
            "roulette spin settled"
        );
        self.set_state(WheelState::Open);

        Ok(result)
    }

    /// Spins, waits out the wheel, then settles.
    ///
    /// `on_start` receives the animation target as soon as the stake is
    /// taken. Returns `None` if the sequence was cancelled during the wait;
    /// the spin then stays pending and [`Roulette::complete_spin`] settles it
    /// later.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Roulette::spin`] or
    /// [`Roulette::complete_spin`].
    pub fn spin_and_settle<P: Pacer>(
        &self,
        sequencer: &mut Sequencer<'_, P>,
        on_start: impl FnOnce(&SpinStart),
    ) -> Result<Option<SpinResult>, SpinError> {
        if sequencer.is_cancelled() {
            return Ok(None);
        }
        let start = self.spin()?;
        sequencer.cue(SoundCue::WheelSpin);
        on_start(&start);

        if !sequencer.step(self.options.timing.spin, Some(SoundCue::BallSettle)) {
            return Ok(None);
        }
        let result = self.complete_spin()?;
        sequencer.cue(result.cue());
        Ok(Some(result))
    }
}
