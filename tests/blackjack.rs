//! Blackjack integration tests.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use casino_core::blackjack::{biased_deal, straight_deal};
use casino_core::card::{fresh_deck, shuffled_deck};
use casino_core::{
    ActionError, BetError, Blackjack, BlackjackOptions, CancelToken, Card, DECK_SIZE, DealError,
    DealMode, DealerStep, Favor, Hand, Immediate, InMemoryLedger, Ledger, LedgerError,
    RoundOutcome, RoundState, Seat, Sequencer, SettleError, SoundCue, SoundSink, Suit,
    Transaction, TransactionKind, hand_value,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const fn card(suit: Suit, rank: u8) -> Card {
    Card::new(suit, rank)
}

fn straight_options() -> BlackjackOptions {
    BlackjackOptions::default().with_deal_mode(DealMode::Straight)
}

fn funded(balance: u64) -> InMemoryLedger {
    let ledger = InMemoryLedger::new();
    ledger.open_account("alice", balance);
    ledger
}

/// Cards are listed in draw order: player, dealer, player, dealer, then hits.
fn set_deck_from_draws<L: Ledger>(table: &Blackjack<L>, draws: &[Card]) {
    let mut deck: Vec<Card> = draws.to_vec();
    deck.reverse();
    *table.deck.lock() = deck;
}

#[test]
fn hand_value_demotes_aces_until_it_fits() {
    let ace = card(Suit::Hearts, 1);
    assert_eq!(hand_value(&[ace, card(Suit::Spades, 1), card(Suit::Clubs, 9)]), 21);
    assert_eq!(hand_value(&[ace, card(Suit::Spades, 1)]), 12);
    assert_eq!(
        hand_value(&[card(Suit::Hearts, 13), card(Suit::Clubs, 12), card(Suit::Clubs, 5)]),
        25
    );

    let soft = Hand::from_cards(&[ace, card(Suit::Clubs, 6)]);
    assert_eq!(soft.value(), 17);
    assert!(soft.is_soft());

    let natural = Hand::from_cards(&[card(Suit::Diamonds, 13), ace]);
    assert!(natural.is_natural());

    let three_card_21 = Hand::from_cards(&[
        card(Suit::Diamonds, 7),
        card(Suit::Clubs, 7),
        card(Suit::Spades, 7),
    ]);
    assert_eq!(three_card_21.value(), 21);
    assert!(!three_card_21.is_natural());
}

#[test]
fn fresh_deck_holds_each_card_once() {
    let deck = fresh_deck();
    assert_eq!(deck.len(), DECK_SIZE);
    let unique: HashSet<Card> = deck.iter().copied().collect();
    assert_eq!(unique.len(), DECK_SIZE);

    let mut rng = ChaCha8Rng::seed_from_u64(9);
    for _ in 0..5 {
        let shuffled = shuffled_deck(&mut rng);
        let reshuffled: HashSet<Card> = shuffled.iter().copied().collect();
        assert_eq!(shuffled.len(), DECK_SIZE);
        assert_eq!(reshuffled, unique);
    }
}

#[test]
fn house_favored_deal_gives_dealer_the_strong_start() {
    for seed in 0..64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut deck = shuffled_deck(&mut rng);
        let deal = biased_deal(&mut deck, Favor::House).unwrap();

        assert!(deal.dealer[0].is_ten_value());
        assert!(deal.dealer[1].value() >= 7);
        for player_card in deal.player {
            assert!((2..=8).contains(&player_card.value()));
        }

        assert_eq!(deck.len(), DECK_SIZE - 4);
        let mut seen: HashSet<Card> = deck.iter().copied().collect();
        for dealt in deal.player.iter().chain(deal.dealer.iter()) {
            assert!(seen.insert(*dealt), "card dealt twice: {dealt:?}");
        }
        assert_eq!(seen.len(), DECK_SIZE);
    }
}

#[test]
fn player_favored_deal_gives_player_the_strong_start() {
    for seed in 0..64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut deck = shuffled_deck(&mut rng);
        let deal = biased_deal(&mut deck, Favor::Player).unwrap();

        assert!(deal.player[0].is_ten_value());
        assert!(deal.player[1].value() >= 8);
        for dealer_card in deal.dealer {
            assert!((2..=6).contains(&dealer_card.value()));
        }
        assert_eq!(deck.len(), DECK_SIZE - 4);
    }
}

#[test]
fn deal_functions_need_four_cards() {
    let mut short = vec![card(Suit::Hearts, 2); 3];
    assert!(biased_deal(&mut short, Favor::House).is_none());
    assert!(straight_deal(&mut short).is_none());
    assert_eq!(short.len(), 3);
}

#[test]
fn reveal_order_alternates_player_and_dealer() {
    let mut deck = vec![
        card(Suit::Spades, 4),
        card(Suit::Clubs, 3),
        card(Suit::Diamonds, 2),
        card(Suit::Hearts, 1),
    ];
    let deal = straight_deal(&mut deck).unwrap();
    let order = deal.reveal_order();
    assert_eq!(order[0], (Seat::Player, card(Suit::Hearts, 1)));
    assert_eq!(order[1], (Seat::Dealer, card(Suit::Diamonds, 2)));
    assert_eq!(order[2], (Seat::Player, card(Suit::Clubs, 3)));
    assert_eq!(order[3], (Seat::Dealer, card(Suit::Spades, 4)));
}

#[test]
fn biased_mode_at_full_house_weight_rigs_every_deal() {
    let options = BlackjackOptions::default().with_deal_mode(DealMode::Biased {
        house_probability: 1.0,
    });
    for seed in 0..16 {
        let ledger = funded(100);
        let table = Blackjack::new(options.clone(), &ledger, "alice", seed);
        table.place_bet(10).unwrap();
        let deal = table.deal().unwrap();
        assert!(deal.dealer[0].is_ten_value());
        assert!(deal.dealer[1].value() >= 7);
        assert_eq!(table.cards_remaining(), DECK_SIZE - 4);
    }
}

#[test]
fn bet_errors() {
    let ledger = funded(20);
    let table = Blackjack::new(straight_options(), &ledger, "alice", 1);

    assert_eq!(table.place_bet(0).unwrap_err(), BetError::ZeroBet);
    assert_eq!(table.place_bet(7).unwrap_err(), BetError::NotAChip(7));
    assert_eq!(table.place_bet(25).unwrap_err(), BetError::InsufficientFunds);
    assert_eq!(table.state(), RoundState::Betting);

    table.place_bet(10).unwrap();
    table.deal().unwrap();
    assert_eq!(table.place_bet(10).unwrap_err(), BetError::InvalidState);
}

#[test]
fn deal_without_stake_is_rejected() {
    let ledger = funded(100);
    let table = Blackjack::new(straight_options(), &ledger, "alice", 1);
    assert_eq!(table.deal().unwrap_err(), DealError::NoBet);
    assert!(ledger.transactions().is_empty());
}

#[test]
fn deal_rechecks_balance_before_debit() {
    let ledger = funded(100);
    let table = Blackjack::new(straight_options(), &ledger, "alice", 1);
    table.place_bet(50).unwrap();

    // Another session spends the money between choosing and dealing.
    ledger.set_balance("alice", 20).unwrap();

    assert_eq!(table.deal().unwrap_err(), DealError::InsufficientFunds);
    assert_eq!(table.state(), RoundState::Betting);
    assert_eq!(ledger.balance_of("alice"), Some(20));
    assert!(ledger.transactions().is_empty());
}

#[test]
fn natural_resolves_immediately() {
    let ledger = funded(100);
    let table = Blackjack::new(straight_options(), &ledger, "alice", 3);
    table.place_bet(10).unwrap();
    set_deck_from_draws(
        &table,
        &[
            card(Suit::Hearts, 13), // player
            card(Suit::Clubs, 5),   // dealer up
            card(Suit::Spades, 1),  // player
            card(Suit::Clubs, 9),   // dealer hole
        ],
    );

    table.deal().unwrap();
    assert_eq!(table.state(), RoundState::Dealing);
    assert_eq!(table.hit().unwrap_err(), ActionError::InvalidState);
    assert_eq!(table.stand().unwrap_err(), ActionError::InvalidState);

    let result = table.finish_deal().unwrap().unwrap();
    assert_eq!(result.outcome, RoundOutcome::Blackjack);
    assert_eq!(result.payout, 25);
    assert_eq!(table.state(), RoundState::Finished);
    assert_eq!(table.result(), Some(result));
    assert_eq!(ledger.balance_of("alice"), Some(115));

    let log = ledger.transactions();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].kind, TransactionKind::Blackjack);
    assert_eq!(log[0].amount, -10);
    assert_eq!(log[1].kind, TransactionKind::BlackjackWin);
    assert_eq!(log[1].amount, 25);
}

#[test]
fn natural_payout_rounds_down() {
    let ledger = funded(100);
    let table = Blackjack::new(straight_options(), &ledger, "alice", 3);
    table.place_bet(5).unwrap();
    set_deck_from_draws(
        &table,
        &[
            card(Suit::Hearts, 1),
            card(Suit::Clubs, 5),
            card(Suit::Spades, 12),
            card(Suit::Clubs, 9),
        ],
    );

    table.deal().unwrap();
    let result = table.finish_deal().unwrap().unwrap();
    // floor(5 * 2.5)
    assert_eq!(result.payout, 12);
    assert_eq!(ledger.balance_of("alice"), Some(107));
}

#[test]
fn push_refunds_exact_stake() {
    let ledger = funded(100);
    let table = Blackjack::new(straight_options(), &ledger, "alice", 4);
    table.place_bet(10).unwrap();
    set_deck_from_draws(
        &table,
        &[
            card(Suit::Hearts, 10),
            card(Suit::Clubs, 10),
            card(Suit::Spades, 8),
            card(Suit::Diamonds, 8),
        ],
    );

    table.deal().unwrap();
    assert_eq!(table.finish_deal().unwrap(), None);
    assert_eq!(table.state(), RoundState::Playing);
    table.stand().unwrap();
    assert_eq!(table.state(), RoundState::DealerTurn);

    let (drawn, result) = table.dealer_play().unwrap();
    assert!(drawn.is_empty());
    assert_eq!(result.outcome, RoundOutcome::Push);
    assert_eq!(result.payout, 10);
    assert_eq!(result.net(), 0);
    assert_eq!(ledger.balance_of("alice"), Some(100));

    let last = ledger.transactions().pop().unwrap();
    assert_eq!(last.kind, TransactionKind::BlackjackRefund);
    assert_eq!(last.kind.as_str(), "blackjack_refund");
    assert_eq!(last.amount, 10);
}

#[test]
fn dealer_draws_to_seventeen_and_wins() {
    let ledger = funded(100);
    let table = Blackjack::new(straight_options(), &ledger, "alice", 5);
    table.place_bet(10).unwrap();
    set_deck_from_draws(
        &table,
        &[
            card(Suit::Hearts, 10),
            card(Suit::Clubs, 10),
            card(Suit::Spades, 8),
            card(Suit::Diamonds, 2),
            card(Suit::Hearts, 3), // dealer 15
            card(Suit::Clubs, 5),  // dealer 20
        ],
    );

    table.deal().unwrap();
    table.finish_deal().unwrap();
    assert_eq!(table.dealer_visible_value(), 10);
    table.stand().unwrap();

    assert!(matches!(table.dealer_step().unwrap(), DealerStep::Drew(c) if c.rank == 3));
    assert!(matches!(table.dealer_step().unwrap(), DealerStep::Drew(c) if c.rank == 5));
    let DealerStep::Settled(result) = table.dealer_step().unwrap() else {
        panic!("dealer should stand on 20");
    };
    assert_eq!(result.outcome, RoundOutcome::Lose);
    assert_eq!(result.dealer_value, 20);
    assert_eq!(result.payout, 0);
    assert_eq!(ledger.balance_of("alice"), Some(90));
    assert_eq!(ledger.transactions().len(), 1);
}

#[test]
fn dealer_stands_on_soft_seventeen() {
    let ledger = funded(100);
    let table = Blackjack::new(straight_options(), &ledger, "alice", 6);
    table.place_bet(10).unwrap();
    set_deck_from_draws(
        &table,
        &[
            card(Suit::Hearts, 10),
            card(Suit::Clubs, 1),
            card(Suit::Spades, 9),
            card(Suit::Diamonds, 6),
            card(Suit::Hearts, 5),
        ],
    );

    table.deal().unwrap();
    table.finish_deal().unwrap();
    table.stand().unwrap();

    let (drawn, result) = table.dealer_play().unwrap();
    assert!(drawn.is_empty());
    assert_eq!(result.dealer_value, 17);
    assert_eq!(result.outcome, RoundOutcome::Win);
    assert_eq!(result.payout, 20);
    assert_eq!(ledger.balance_of("alice"), Some(110));
}

#[test]
fn dealer_bust_pays_double() {
    let ledger = funded(100);
    let table = Blackjack::new(straight_options(), &ledger, "alice", 7);
    table.place_bet(10).unwrap();
    set_deck_from_draws(
        &table,
        &[
            card(Suit::Hearts, 10),
            card(Suit::Clubs, 10),
            card(Suit::Spades, 2),
            card(Suit::Diamonds, 6),
            card(Suit::Hearts, 12),
        ],
    );

    table.deal().unwrap();
    table.finish_deal().unwrap();
    table.stand().unwrap();

    let (drawn, result) = table.dealer_play().unwrap();
    assert_eq!(drawn.len(), 1);
    assert_eq!(result.outcome, RoundOutcome::DealerBust);
    assert_eq!(result.payout, 20);
    assert_eq!(
        ledger.transactions().last().map(|t| t.kind),
        Some(TransactionKind::BlackjackWin)
    );
}

#[test]
fn hit_past_twenty_one_is_a_bust() {
    let ledger = funded(100);
    let table = Blackjack::new(straight_options(), &ledger, "alice", 8);
    table.place_bet(10).unwrap();
    set_deck_from_draws(
        &table,
        &[
            card(Suit::Hearts, 10),
            card(Suit::Clubs, 9),
            card(Suit::Spades, 6),
            card(Suit::Diamonds, 7),
            card(Suit::Hearts, 4), // 20
            card(Suit::Clubs, 5),  // 25
        ],
    );

    table.deal().unwrap();
    table.finish_deal().unwrap();
    assert_eq!(table.hit().unwrap().rank, 4);
    assert_eq!(table.state(), RoundState::Playing);
    assert_eq!(table.hit().unwrap().rank, 5);

    assert_eq!(table.state(), RoundState::Finished);
    let result = table.result().unwrap();
    assert_eq!(result.outcome, RoundOutcome::Bust);
    assert_eq!(result.player_value, 25);
    assert_eq!(table.dealer_step().unwrap_err(), SettleError::InvalidState);
    assert_eq!(ledger.balance_of("alice"), Some(90));
}

#[test]
fn double_down_bust_skips_dealer_turn() {
    let ledger = funded(100);
    let table = Blackjack::new(straight_options(), &ledger, "alice", 9);
    table.place_bet(10).unwrap();
    set_deck_from_draws(
        &table,
        &[
            card(Suit::Hearts, 10),
            card(Suit::Clubs, 9),
            card(Suit::Spades, 4),
            card(Suit::Diamonds, 7),
            card(Suit::Hearts, 13), // 24
        ],
    );

    table.deal().unwrap();
    table.finish_deal().unwrap();
    assert!(table.can_double());

    let drawn = table.double_down().unwrap();
    assert_eq!(drawn.rank, 13);
    assert_eq!(table.state(), RoundState::Finished);
    assert_eq!(table.bet(), 20);
    assert_eq!(table.dealer_hand().len(), 2);

    let result = table.result().unwrap();
    assert_eq!(result.outcome, RoundOutcome::Bust);
    assert_eq!(result.player_value, 24);
    assert_eq!(ledger.balance_of("alice"), Some(80));

    let stakes: Vec<i64> = ledger.transactions().iter().map(|t| t.amount).collect();
    assert_eq!(stakes, vec![-10, -10]);
}

#[test]
fn double_down_then_dealer_plays() {
    let ledger = funded(100);
    let table = Blackjack::new(straight_options(), &ledger, "alice", 10);
    table.place_bet(10).unwrap();
    set_deck_from_draws(
        &table,
        &[
            card(Suit::Hearts, 6),
            card(Suit::Clubs, 10),
            card(Suit::Spades, 5),
            card(Suit::Diamonds, 7),
            card(Suit::Hearts, 10), // player 21
        ],
    );

    table.deal().unwrap();
    table.finish_deal().unwrap();
    table.double_down().unwrap();
    assert_eq!(table.state(), RoundState::DealerTurn);

    let (_, result) = table.dealer_play().unwrap();
    assert_eq!(result.outcome, RoundOutcome::Win);
    assert_eq!(result.bet, 20);
    assert_eq!(result.payout, 40);
    assert_eq!(ledger.balance_of("alice"), Some(120));
}

#[test]
fn double_down_needs_exactly_two_cards() {
    let ledger = funded(100);
    let table = Blackjack::new(straight_options(), &ledger, "alice", 11);
    table.place_bet(10).unwrap();
    set_deck_from_draws(
        &table,
        &[
            card(Suit::Hearts, 2),
            card(Suit::Clubs, 10),
            card(Suit::Spades, 3),
            card(Suit::Diamonds, 7),
            card(Suit::Hearts, 4),
            card(Suit::Hearts, 5),
        ],
    );

    table.deal().unwrap();
    table.finish_deal().unwrap();
    table.hit().unwrap();
    assert!(!table.can_double());
    assert_eq!(table.double_down().unwrap_err(), ActionError::CannotDouble);
    assert_eq!(table.state(), RoundState::Playing);
}

#[test]
fn double_down_rejected_without_funds() {
    let ledger = funded(15);
    let table = Blackjack::new(straight_options(), &ledger, "alice", 12);
    table.place_bet(10).unwrap();
    set_deck_from_draws(
        &table,
        &[
            card(Suit::Hearts, 5),
            card(Suit::Clubs, 10),
            card(Suit::Spades, 6),
            card(Suit::Diamonds, 7),
            card(Suit::Hearts, 10),
        ],
    );

    table.deal().unwrap();
    table.finish_deal().unwrap();
    assert_eq!(table.double_down().unwrap_err(), ActionError::InsufficientFunds);
    assert_eq!(table.state(), RoundState::Playing);
    assert_eq!(table.bet(), 10);
    assert_eq!(table.player_hand().len(), 2);
    assert_eq!(ledger.balance_of("alice"), Some(5));
}

#[test]
fn reset_only_after_finish() {
    let ledger = funded(100);
    let table = Blackjack::new(straight_options(), &ledger, "alice", 13);
    table.reset().unwrap();

    table.place_bet(10).unwrap();
    set_deck_from_draws(
        &table,
        &[
            card(Suit::Hearts, 10),
            card(Suit::Clubs, 10),
            card(Suit::Spades, 7),
            card(Suit::Diamonds, 8),
        ],
    );
    table.deal().unwrap();
    table.finish_deal().unwrap();
    assert_eq!(table.reset().unwrap_err(), ActionError::InvalidState);

    table.stand().unwrap();
    table.dealer_play().unwrap();
    table.reset().unwrap();

    assert_eq!(table.state(), RoundState::Betting);
    assert_eq!(table.bet(), 0);
    assert!(table.player_hand().is_empty());
    assert!(table.dealer_hand().is_empty());
    assert_eq!(table.result(), None);
}

#[derive(Default)]
struct FlakyLedger {
    inner: InMemoryLedger,
    fail_debit: AtomicBool,
    fail_credit: AtomicBool,
    fail_log: AtomicBool,
}

impl Ledger for FlakyLedger {
    fn balance(&self, user_id: &str) -> Result<u64, LedgerError> {
        self.inner.balance(user_id)
    }

    fn set_balance(&self, user_id: &str, balance: u64) -> Result<(), LedgerError> {
        self.inner.set_balance(user_id, balance)
    }

    fn append_transaction(&self, transaction: &Transaction) -> Result<(), LedgerError> {
        if self.fail_log.load(Ordering::SeqCst) {
            return Err(LedgerError::Remote("log timeout".into()));
        }
        self.inner.append_transaction(transaction)
    }

    fn debit(&self, user_id: &str, amount: u64) -> Result<u64, LedgerError> {
        if self.fail_debit.load(Ordering::SeqCst) {
            return Err(LedgerError::Remote("debit timeout".into()));
        }
        self.inner.debit(user_id, amount)
    }

    fn credit(&self, user_id: &str, amount: u64) -> Result<u64, LedgerError> {
        if self.fail_credit.load(Ordering::SeqCst) {
            return Err(LedgerError::Remote("credit timeout".into()));
        }
        self.inner.credit(user_id, amount)
    }
}

#[test]
fn failed_debit_leaves_round_unstarted() {
    let ledger = FlakyLedger::default();
    ledger.inner.open_account("alice", 100);
    ledger.fail_debit.store(true, Ordering::SeqCst);

    let table = Blackjack::new(straight_options(), &ledger, "alice", 14);
    table.place_bet(10).unwrap();
    assert!(matches!(
        table.deal().unwrap_err(),
        DealError::Ledger(LedgerError::Remote(_))
    ));
    assert_eq!(table.state(), RoundState::Betting);
    assert!(table.player_hand().is_empty());
    assert_eq!(ledger.inner.balance_of("alice"), Some(100));

    ledger.fail_debit.store(false, Ordering::SeqCst);
    table.deal().unwrap();
    assert_eq!(table.state(), RoundState::Dealing);
}

#[test]
fn failed_stake_log_reverses_the_debit() {
    let ledger = FlakyLedger::default();
    ledger.inner.open_account("alice", 100);
    ledger.fail_log.store(true, Ordering::SeqCst);

    let table = Blackjack::new(straight_options(), &ledger, "alice", 15);
    table.place_bet(10).unwrap();
    assert!(table.deal().is_err());
    assert_eq!(table.state(), RoundState::Betting);
    assert_eq!(ledger.inner.balance_of("alice"), Some(100));
    assert!(ledger.inner.transactions().is_empty());
}

#[test]
fn failed_payout_keeps_dealer_turn_for_retry() {
    let ledger = FlakyLedger::default();
    ledger.inner.open_account("alice", 100);

    let table = Blackjack::new(straight_options(), &ledger, "alice", 16);
    table.place_bet(10).unwrap();
    set_deck_from_draws(
        &table,
        &[
            card(Suit::Hearts, 10),
            card(Suit::Clubs, 10),
            card(Suit::Spades, 10),
            card(Suit::Diamonds, 8),
        ],
    );
    table.deal().unwrap();
    table.finish_deal().unwrap();
    table.stand().unwrap();

    ledger.fail_credit.store(true, Ordering::SeqCst);
    assert!(matches!(
        table.dealer_step().unwrap_err(),
        SettleError::Ledger(LedgerError::Remote(_))
    ));
    assert_eq!(table.state(), RoundState::DealerTurn);
    assert_eq!(table.result(), None);

    ledger.fail_credit.store(false, Ordering::SeqCst);
    let DealerStep::Settled(result) = table.dealer_step().unwrap() else {
        panic!("dealer already stands on 18");
    };
    assert_eq!(result.outcome, RoundOutcome::Win);
    assert_eq!(ledger.inner.balance_of("alice"), Some(110));
}

#[derive(Default)]
struct RecordingSink(Mutex<Vec<SoundCue>>);

impl SoundSink for RecordingSink {
    fn play(&self, cue: SoundCue) {
        self.0.lock().unwrap().push(cue);
    }
}

#[test]
fn timed_reveal_and_dealer_play() {
    let ledger = funded(100);
    let table = Blackjack::new(straight_options(), &ledger, "alice", 17);
    table.place_bet(10).unwrap();
    set_deck_from_draws(
        &table,
        &[
            card(Suit::Hearts, 10),
            card(Suit::Clubs, 10),
            card(Suit::Spades, 9),
            card(Suit::Diamonds, 4),
            card(Suit::Hearts, 3),
        ],
    );
    table.deal().unwrap();

    let sink = RecordingSink::default();
    let mut sequencer = Sequencer::new(CancelToken::new(), Immediate).with_sound(&sink, false);

    let mut seats = Vec::new();
    let state = table
        .reveal_initial(&mut sequencer, |seat, _| seats.push(seat))
        .unwrap();
    assert_eq!(state, Some(RoundState::Playing));
    assert_eq!(
        seats,
        vec![Seat::Player, Seat::Dealer, Seat::Player, Seat::Dealer]
    );

    table.stand().unwrap();
    let mut dealer_draws = Vec::new();
    let result = table
        .play_dealer(&mut sequencer, |card| dealer_draws.push(card))
        .unwrap()
        .unwrap();
    assert_eq!(dealer_draws.len(), 1);
    assert_eq!(result.dealer_value, 17);
    assert_eq!(result.outcome, RoundOutcome::Win);

    let cues = sink.0.lock().unwrap().clone();
    assert_eq!(cues.iter().filter(|c| **c == SoundCue::CardDeal).count(), 5);
    assert_eq!(cues.last(), Some(&SoundCue::Win));
}

#[test]
fn cancelled_dealer_play_leaves_state_untouched() {
    let ledger = funded(100);
    let table = Blackjack::new(straight_options(), &ledger, "alice", 18);
    table.place_bet(10).unwrap();
    set_deck_from_draws(
        &table,
        &[
            card(Suit::Hearts, 10),
            card(Suit::Clubs, 10),
            card(Suit::Spades, 9),
            card(Suit::Diamonds, 2),
            card(Suit::Hearts, 3),
        ],
    );
    table.deal().unwrap();
    table.finish_deal().unwrap();
    table.stand().unwrap();

    let token = CancelToken::new();
    let mut sequencer = Sequencer::new(token.clone(), Immediate);
    token.cancel();

    let outcome = table.play_dealer(&mut sequencer, |_| {}).unwrap();
    assert_eq!(outcome, None);
    assert_eq!(table.state(), RoundState::DealerTurn);
    assert_eq!(table.dealer_hand().len(), 2);
    assert_eq!(table.cards_remaining(), 1);
}
