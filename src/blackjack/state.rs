//! Round state types.

use crate::card::Card;
use crate::result::RoundResult;

/// Blackjack round state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// No hand exists; a stake may be chosen.
    Betting,
    /// Stake taken and cards dealt; waiting for the reveal to finish.
    Dealing,
    /// Waiting for the player to hit, stand, or double.
    Playing,
    /// Dealer plays out their hand.
    DealerTurn,
    /// Outcome fixed; only a reset is accepted.
    Finished,
}

/// Which side of the table a card goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    /// The player.
    Player,
    /// The dealer.
    Dealer,
}

/// One step of the dealer's automatic play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealerStep {
    /// The dealer drew a card and may draw again.
    Drew(Card),
    /// The dealer stood and the round was settled.
    Settled(RoundResult),
}
