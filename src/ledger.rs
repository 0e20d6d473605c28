//! Balance ledger the engines debit and credit.
//!
//! The authoritative balance lives behind the [`Ledger`] trait. Engines
//! re-read it before every debit and never trust a cached copy. Backends
//! that can express a guarded decrement (`balance = balance - amount WHERE
//! balance >= amount`) should override [`Ledger::debit`]; the provided body
//! is a read-then-write and leaves a small race window open.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use thiserror::Error;

use crate::sync::Mutex;

/// Errors reported by a ledger backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// No balance record exists for the user.
    #[error("unknown user")]
    UnknownUser,
    /// The balance does not cover the requested debit.
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Balance at the time of the check.
        balance: u64,
        /// Amount that was requested.
        requested: u64,
    },
    /// The remote call failed or timed out.
    #[error("ledger request failed: {0}")]
    Remote(String),
}

/// Transaction type tag, stored as a plain string by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TransactionKind {
    /// Blackjack stake (initial bet or double-down).
    Blackjack,
    /// Blackjack winnings.
    BlackjackWin,
    /// Blackjack push refund.
    BlackjackRefund,
    /// Roulette stake.
    Roulette,
    /// Roulette winnings.
    RouletteWin,
}

impl TransactionKind {
    /// The tag written to the `type` column.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Blackjack => "blackjack",
            Self::BlackjackWin => "blackjack_win",
            Self::BlackjackRefund => "blackjack_refund",
            Self::Roulette => "roulette",
            Self::RouletteWin => "roulette_win",
        }
    }
}

/// One row appended per debit and per credit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transaction {
    /// Owner of the balance.
    pub user_id: String,
    /// Signed amount: negative for stakes, positive for payouts.
    pub amount: i64,
    /// Type tag.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: TransactionKind,
    /// Human readable description.
    pub description: String,
}

fn signed(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}

impl Transaction {
    /// A stake leaving the balance.
    #[must_use]
    pub fn debit(
        user_id: &str,
        amount: u64,
        kind: TransactionKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            amount: -signed(amount),
            kind,
            description: description.into(),
        }
    }

    /// A payout landing on the balance.
    #[must_use]
    pub fn credit(
        user_id: &str,
        amount: u64,
        kind: TransactionKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            amount: signed(amount),
            kind,
            description: description.into(),
        }
    }
}

/// Remote balance store consumed by both engines.
///
/// No atomicity is promised across calls.
pub trait Ledger {
    /// Authoritative balance read.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is unknown or the backend fails.
    fn balance(&self, user_id: &str) -> Result<u64, LedgerError>;

    /// Overwrites the balance with an absolute value.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is unknown or the backend fails.
    fn set_balance(&self, user_id: &str, balance: u64) -> Result<(), LedgerError>;

    /// Appends a row to the transaction log.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn append_transaction(&self, transaction: &Transaction) -> Result<(), LedgerError>;

    /// Removes `amount` from the balance if it is covered, returning the new
    /// balance.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientFunds`] if the balance is short, or
    /// any backend error.
    fn debit(&self, user_id: &str, amount: u64) -> Result<u64, LedgerError> {
        let balance = self.balance(user_id)?;
        if balance < amount {
            return Err(LedgerError::InsufficientFunds {
                balance,
                requested: amount,
            });
        }
        let updated = balance - amount;
        self.set_balance(user_id, updated)?;
        Ok(updated)
    }

    /// Adds `amount` to the balance, returning the new balance.
    ///
    /// # Errors
    ///
    /// Returns any backend error.
    fn credit(&self, user_id: &str, amount: u64) -> Result<u64, LedgerError> {
        let updated = self.balance(user_id)?.saturating_add(amount);
        self.set_balance(user_id, updated)?;
        Ok(updated)
    }
}

impl<L: Ledger + ?Sized> Ledger for &L {
    fn balance(&self, user_id: &str) -> Result<u64, LedgerError> {
        (**self).balance(user_id)
    }

    fn set_balance(&self, user_id: &str, balance: u64) -> Result<(), LedgerError> {
        (**self).set_balance(user_id, balance)
    }

    fn append_transaction(&self, transaction: &Transaction) -> Result<(), LedgerError> {
        (**self).append_transaction(transaction)
    }

    fn debit(&self, user_id: &str, amount: u64) -> Result<u64, LedgerError> {
        (**self).debit(user_id, amount)
    }

    fn credit(&self, user_id: &str, amount: u64) -> Result<u64, LedgerError> {
        (**self).credit(user_id, amount)
    }
}

impl<L: Ledger + ?Sized> Ledger for Arc<L> {
    fn balance(&self, user_id: &str) -> Result<u64, LedgerError> {
        (**self).balance(user_id)
    }

    fn set_balance(&self, user_id: &str, balance: u64) -> Result<(), LedgerError> {
        (**self).set_balance(user_id, balance)
    }

    fn append_transaction(&self, transaction: &Transaction) -> Result<(), LedgerError> {
        (**self).append_transaction(transaction)
    }

    fn debit(&self, user_id: &str, amount: u64) -> Result<u64, LedgerError> {
        (**self).debit(user_id, amount)
    }

    fn credit(&self, user_id: &str, amount: u64) -> Result<u64, LedgerError> {
        (**self).credit(user_id, amount)
    }
}

/// A logged transaction with its position in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Monotonic sequence number, standing in for a timestamp.
    pub sequence: u64,
    /// The logged row.
    pub transaction: Transaction,
}

/// Process-local ledger with an atomic guarded debit.
#[derive(Default)]
pub struct InMemoryLedger {
    balances: Mutex<HashMap<String, u64>>,
    log: Mutex<Vec<LedgerEntry>>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or replaces an account with the given opening balance.
    pub fn open_account(&self, user_id: impl Into<String>, balance: u64) {
        self.balances.lock().insert(user_id.into(), balance);
    }

    /// Current balance of `user_id`, if the account exists.
    pub fn balance_of(&self, user_id: &str) -> Option<u64> {
        self.balances.lock().get(user_id).copied()
    }

    /// Returns all logged transactions, oldest first.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.log
            .lock()
            .iter()
            .map(|entry| entry.transaction.clone())
            .collect()
    }

    /// Returns all log entries, oldest first.
    pub fn entries(&self) -> Vec<LedgerEntry> {
        self.log.lock().clone()
    }
}

impl Ledger for InMemoryLedger {
    fn balance(&self, user_id: &str) -> Result<u64, LedgerError> {
        self.balances
            .lock()
            .get(user_id)
            .copied()
            .ok_or(LedgerError::UnknownUser)
    }

    fn set_balance(&self, user_id: &str, balance: u64) -> Result<(), LedgerError> {
        let mut balances = self.balances.lock();
        let slot = balances.get_mut(user_id).ok_or(LedgerError::UnknownUser)?;
        *slot = balance;
        drop(balances);
        Ok(())
    }

    fn append_transaction(&self, transaction: &Transaction) -> Result<(), LedgerError> {
        let mut log = self.log.lock();
        let sequence = log.len() as u64 + 1;
        log.push(LedgerEntry {
            sequence,
            transaction: transaction.clone(),
        });
        drop(log);
        Ok(())
    }

    fn debit(&self, user_id: &str, amount: u64) -> Result<u64, LedgerError> {
        let mut balances = self.balances.lock();
        let slot = balances.get_mut(user_id).ok_or(LedgerError::UnknownUser)?;
        if *slot < amount {
            return Err(LedgerError::InsufficientFunds {
                balance: *slot,
                requested: amount,
            });
        }
        *slot -= amount;
        Ok(*slot)
    }

    fn credit(&self, user_id: &str, amount: u64) -> Result<u64, LedgerError> {
        let mut balances = self.balances.lock();
        let slot = balances.get_mut(user_id).ok_or(LedgerError::UnknownUser)?;
        *slot = slot.saturating_add(amount);
        Ok(*slot)
    }
}

/// Debits `amount` and logs it, undoing the debit if the log write fails.
///
/// Returns the new balance.
///
/// # Errors
///
/// Returns the first ledger error; the balance is left as it was.
pub fn charge<L: Ledger + ?Sized>(
    ledger: &L,
    user_id: &str,
    amount: u64,
    kind: TransactionKind,
    description: &str,
) -> Result<u64, LedgerError> {
    let balance = ledger.debit(user_id, amount)?;
    if let Err(err) =
        ledger.append_transaction(&Transaction::debit(user_id, amount, kind, description))
    {
        tracing::warn!(user_id, amount, error = %err, "stake log failed, reversing debit");
        if let Err(undo) = ledger.credit(user_id, amount) {
            tracing::warn!(user_id, amount, error = %undo, "debit reversal failed");
        }
        return Err(err);
    }
    Ok(balance)
}

/// Credits `amount` and logs it, undoing the credit if the log write fails.
///
/// Returns the new balance.
///
/// # Errors
///
/// Returns the first ledger error; the balance is left as it was.
pub fn pay<L: Ledger + ?Sized>(
    ledger: &L,
    user_id: &str,
    amount: u64,
    kind: TransactionKind,
    description: &str,
) -> Result<u64, LedgerError> {
    let balance = ledger.credit(user_id, amount)?;
    if let Err(err) =
        ledger.append_transaction(&Transaction::credit(user_id, amount, kind, description))
    {
        tracing::warn!(user_id, amount, error = %err, "payout log failed, reversing credit");
        if let Err(undo) = ledger.debit(user_id, amount) {
            tracing::warn!(user_id, amount, error = %undo, "credit reversal failed");
        }
        return Err(err);
    }
    Ok(balance)
}
