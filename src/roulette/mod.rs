//! Roulette engine.
//!
//! One [`Roulette`] serves one player session and runs at most one spin at
//! a time. Bets accumulate on a [`BetSlip`] while the wheel is
//! [`WheelState::Open`]; [`Roulette::spin`] takes the stake and picks the
//! number, and [`Roulette::complete_spin`] pays out once the wheel stops.

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::ledger::{Ledger, LedgerError};
use crate::options::RouletteOptions;
use crate::result::SpinResult;
use crate::sync::{self, Mutex};

pub mod bet;
pub mod selection;
mod spin;
pub mod wheel;

pub use bet::{BetKind, BetSlip, PlacedBet};
pub use selection::select_outcome;
pub use wheel::{Color, WHEEL_ORDER, color_of, is_red, pocket_index, target_rotation};

/// Roulette table state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelState {
    /// Accepting bets.
    Open,
    /// The wheel is turning; bets are locked.
    Spinning,
    /// The table is switched off by configuration.
    Disabled,
}

/// Returned when a spin starts, for driving the wheel animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinStart {
    /// The number the ball will land on.
    pub outcome: u8,
    /// Position of the number in [`WHEEL_ORDER`].
    pub pocket_index: usize,
    /// Absolute wheel rotation, in degrees, at rest.
    pub rotation: f64,
}

/// A spin that has been paid for but not yet settled.
#[derive(Debug, Clone)]
struct PendingSpin {
    outcome: u8,
    slip: BetSlip,
}

/// A single-player roulette table backed by a remote balance.
pub struct Roulette<L> {
    /// Table options.
    pub options: RouletteOptions,
    /// Current table state.
    pub state: Mutex<WheelState>,
    user_id: String,
    ledger: L,
    slip: Mutex<BetSlip>,
    pending: Mutex<Option<PendingSpin>>,
    /// Recent outcomes, most recent first.
    history: Mutex<VecDeque<u8>>,
    last_result: Mutex<Option<SpinResult>>,
    rotation: Mutex<f64>,
    rng: Mutex<ChaCha8Rng>,
}

impl<L: Ledger> Roulette<L> {
    /// Creates a table for `user_id` with the given seed.
    ///
    /// A table built from options with `enabled == false` starts and stays
    /// [`WheelState::Disabled`].
    ///
    /// # Example
    ///
    /// ```
    /// use casino_core::{InMemoryLedger, Roulette, RouletteOptions, WheelState};
    ///
    /// let ledger = InMemoryLedger::new();
    /// ledger.open_account("alice", 100);
    /// let options = RouletteOptions::from_site_settings([("roulette_enabled", "false")]);
    /// let table = Roulette::new(options, ledger, "alice", 7);
    /// assert_eq!(table.state(), WheelState::Disabled);
    /// ```
    #[must_use]
    pub fn new(options: RouletteOptions, ledger: L, user_id: impl Into<String>, seed: u64) -> Self {
        let state = if options.enabled {
            WheelState::Open
        } else {
            WheelState::Disabled
        };
        Self {
            options,
            state: Mutex::new(state),
            user_id: user_id.into(),
            ledger,
            slip: Mutex::new(BetSlip::new()),
            pending: Mutex::new(None),
            history: Mutex::new(VecDeque::with_capacity(options.history_len)),
            last_result: Mutex::new(None),
            rotation: Mutex::new(0.0),
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    fn set_state(&self, next: WheelState) {
        let previous = sync::replace(&self.state, next);
        debug!(user_id = %self.user_id, ?previous, ?next, "roulette state change");
    }

    /// Returns the current table state.
    pub fn state(&self) -> WheelState {
        *self.state.lock()
    }

    /// Returns whether the table accepts operations.
    pub fn is_enabled(&self) -> bool {
        self.state() != WheelState::Disabled
    }

    /// Returns the open bets.
    pub fn bets(&self) -> Vec<PlacedBet> {
        self.slip.lock().bets().to_vec()
    }

    /// Sum of all open stakes.
    pub fn total_stake(&self) -> u64 {
        self.slip.lock().total()
    }

    /// Recent outcomes, most recent first.
    pub fn history(&self) -> Vec<u8> {
        self.history.lock().iter().copied().collect()
    }

    /// The result shown from the previous spin, if any.
    pub fn last_result(&self) -> Option<SpinResult> {
        self.last_result.lock().clone()
    }

    /// Current absolute wheel rotation in degrees.
    pub fn rotation(&self) -> f64 {
        *self.rotation.lock()
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
}
