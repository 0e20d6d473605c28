//! Initial two-card deal.
//!
//! The biased deal decides up front which side gets the stronger start and
//! then pulls cards from the shuffled deck that fit that plan. Only the four
//! starting cards are chosen this way; every later draw comes off the top of
//! what is left.

extern crate alloc;

use alloc::vec::Vec;
use core::ops::RangeInclusive;

use crate::card::Card;

use super::state::Seat;

/// Side the biased deal favors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Favor {
    /// Strong dealer start, weak player start.
    House,
    /// Strong player start, weak dealer start.
    Player,
}

/// The four starting cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialDeal {
    /// Player's first and second card.
    pub player: [Card; 2],
    /// Dealer's first and second card.
    pub dealer: [Card; 2],
}

impl InitialDeal {
    /// Cards in the order they are shown: player, dealer, player, dealer.
    #[must_use]
    pub const fn reveal_order(&self) -> [(Seat, Card); 4] {
        [
            (Seat::Player, self.player[0]),
            (Seat::Dealer, self.dealer[0]),
            (Seat::Player, self.player[1]),
            (Seat::Dealer, self.dealer[1]),
        ]
    }
}

const TEN_VALUE: RangeInclusive<u8> = 10..=10;
/// Dealer's second card when the house is favored: 7 through Ace.
const HOUSE_DEALER_KICKER: RangeInclusive<u8> = 7..=11;
/// Player's cards when the house is favored.
const HOUSE_PLAYER_CARD: RangeInclusive<u8> = 2..=8;
/// Player's second card when the player is favored: 8 through Ace.
const PLAYER_KICKER: RangeInclusive<u8> = 8..=11;
/// Dealer's cards when the player is favored.
const PLAYER_DEALER_CARD: RangeInclusive<u8> = 2..=6;

/// Removes a card whose value falls in `window`, or the top card if none
/// does. Returns `None` only when the deck is empty.
fn take_matching(deck: &mut Vec<Card>, window: &RangeInclusive<u8>) -> Option<Card> {
    deck.iter()
        .rposition(|card| window.contains(&card.value()))
        .map(|index| deck.remove(index))
        .or_else(|| deck.pop())
}

/// Deals the starting hands in favor of `favor`, removing the four cards
/// from `deck`.
///
/// Returns `None` if the deck holds fewer than four cards.
pub fn biased_deal(deck: &mut Vec<Card>, favor: Favor) -> Option<InitialDeal> {
    if deck.len() < 4 {
        return None;
    }

    let (strong, strong_kicker, weak) = match favor {
        Favor::House => (TEN_VALUE, HOUSE_DEALER_KICKER, HOUSE_PLAYER_CARD),
        Favor::Player => (TEN_VALUE, PLAYER_KICKER, PLAYER_DEALER_CARD),
    };

    let strong_hand = [
        take_matching(deck, &strong)?,
        take_matching(deck, &strong_kicker)?,
    ];
    let weak_hand = [take_matching(deck, &weak)?, take_matching(deck, &weak)?];

    Some(match favor {
        Favor::House => InitialDeal {
            player: weak_hand,
            dealer: strong_hand,
        },
        Favor::Player => InitialDeal {
            player: strong_hand,
            dealer: weak_hand,
        },
    })
}

/// Deals the starting hands off the top of `deck` in reveal order.
///
/// Returns `None` if the deck holds fewer than four cards.
pub fn straight_deal(deck: &mut Vec<Card>) -> Option<InitialDeal> {
    if deck.len() < 4 {
        return None;
    }
    let player_first = deck.pop()?;
    let dealer_first = deck.pop()?;
    let player_second = deck.pop()?;
    let dealer_second = deck.pop()?;
    Some(InitialDeal {
        player: [player_first, player_second],
        dealer: [dealer_first, dealer_second],
    })
}
