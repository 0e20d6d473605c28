//! CLI casino demo: blackjack and roulette against an in-memory ledger.

use std::io::{self, Write};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use casino_core::{
    BetKind, Blackjack, BlackjackOptions, CancelToken, Card, Hand, InMemoryLedger, Roulette,
    RouletteOptions, RoundState, Seat, Sequencer, SoundCue, SoundSink, Suit, ThreadPacer, Timing,
};

const USER: &str = "player";

struct TerminalSink;

impl SoundSink for TerminalSink {
    fn play(&self, cue: SoundCue) {
        println!("  ~ {cue:?} ({} ms)", cue.duration_ms());
    }
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "casino_core=warn".into()),
        )
        .try_init();

    println!("Casino CLI demo (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let ledger = InMemoryLedger::new();
    ledger.open_account(USER, 500);

    let timing = Timing {
        card_reveal: Duration::from_millis(250),
        dealer_draw: Duration::from_millis(400),
        spin: Duration::from_millis(1500),
        full_rotations: 5,
    };
    let blackjack = Blackjack::new(
        BlackjackOptions::default().with_timing(timing),
        &ledger,
        USER,
        seed,
    );
    let roulette = Roulette::new(
        RouletteOptions::default().with_timing(timing),
        &ledger,
        USER,
        seed.wrapping_add(1),
    );

    let muted = prompt_line("Mute sound? (y/n): ") == "y";
    let sink = TerminalSink;

    loop {
        let balance = ledger.balance_of(USER).unwrap_or(0);
        if balance == 0 {
            println!("You are out of money. Game over.");
            break;
        }
        println!("\nBalance: {balance}");

        let mut sequencer =
            Sequencer::new(CancelToken::new(), ThreadPacer).with_sound(&sink, muted);
        match prompt_line("[b]lackjack, [r]oulette or [q]uit: ").as_str() {
            "b" | "blackjack" => play_blackjack(&blackjack, &mut sequencer),
            "r" | "roulette" => play_roulette(&roulette, &mut sequencer),
            "q" | "quit" => {
                println!("Goodbye.");
                break;
            }
            _ => println!("Unknown choice."),
        }
    }
}

fn play_blackjack(table: &Blackjack<&InMemoryLedger>, sequencer: &mut Sequencer<'_, ThreadPacer>) {
    let chips = table
        .options
        .chips
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("/");
    let Some(bet) = prompt_u64(&format!("Stake ({chips}, 0 to go back): ")) else {
        return;
    };
    if bet == 0 {
        return;
    }

    if let Err(err) = table.place_bet(bet) {
        sequencer.cue(SoundCue::Error);
        println!("Bet error: {err}");
        return;
    }
    sequencer.cue(SoundCue::Chip);
    if let Err(err) = table.deal() {
        sequencer.cue(SoundCue::Error);
        println!("Deal error: {err}");
        return;
    }

    let revealed = table.reveal_initial(sequencer, |seat, card| {
        let who = match seat {
            Seat::Player => "You",
            Seat::Dealer => "Dealer",
        };
        println!("{who} draw {}", format_card(&card));
    });
    if let Err(err) = revealed {
        println!("Deal error: {err}");
        return;
    }

    while table.state() == RoundState::Playing {
        print_table(table);
        let double = if table.can_double() { " [d]ouble" } else { "" };
        let action = prompt_line(&format!("Actions: [h]it [s]tand{double}: "));
        let result = match action.as_str() {
            "h" | "hit" => table.hit().map(|card| println!("You draw {}", format_card(&card))),
            "s" | "stand" => table.stand(),
            "d" | "double" => table
                .double_down()
                .map(|card| println!("You draw {}", format_card(&card))),
            _ => {
                println!("Unknown action.");
                continue;
            }
        };
        if let Err(err) = result {
            sequencer.cue(SoundCue::Error);
            println!("Action error: {err}");
        }
    }

    if table.state() == RoundState::DealerTurn {
        println!("Dealer reveals {}", format_hand(&table.dealer_hand()));
        let played = table.play_dealer(sequencer, |card| {
            println!("Dealer draws {}", format_card(&card));
        });
        if let Err(err) = played {
            println!("Dealer error: {err}");
        }
    }

    if let Some(result) = table.result() {
        print_table(table);
        println!(
            "{} Payout: {} (net {})",
            result.outcome.message(),
            result.payout,
            result.net()
        );
    }
    if let Err(err) = table.reset() {
        println!("Reset error: {err}");
    }
}

fn play_roulette(table: &Roulette<&InMemoryLedger>, sequencer: &mut Sequencer<'_, ThreadPacer>) {
    let history = table
        .history()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    println!("Recent: {history}");
    println!("Bets: red black even odd low high d1-d3 c1-c3 or a number 0-36. Blank line spins.");

    loop {
        let input = prompt_line("Bet: ");
        if input.is_empty() {
            break;
        }
        if input == "q" {
            let _ = table.clear_bets();
            return;
        }
        let Some(kind) = parse_bet(&input) else {
            println!("Unknown bet.");
            continue;
        };
        let Some(amount) = prompt_u64("Amount: ") else {
            return;
        };
        match table.place_bet(kind, amount) {
            Ok(()) => sequencer.cue(SoundCue::Chip),
            Err(err) => {
                sequencer.cue(SoundCue::Error);
                println!("Bet error: {err}");
            }
        }
    }

    match table.spin_and_settle(sequencer, |_| println!("The wheel spins...")) {
        Ok(Some(result)) => {
            println!("Ball lands on {} ({:?})", result.outcome, result.color);
            for bet in &result.winning_bets {
                println!("  {} wins", bet.label);
            }
            println!(
                "Staked {}, won {} (net {})",
                result.total_stake,
                result.winnings,
                result.net()
            );
        }
        Ok(None) => println!("Spin interrupted."),
        Err(err) => {
            sequencer.cue(SoundCue::Error);
            println!("Spin error: {err}");
        }
    }
}

fn parse_bet(input: &str) -> Option<BetKind> {
    let kind = match input {
        "red" => BetKind::Red,
        "black" => BetKind::Black,
        "even" => BetKind::Even,
        "odd" => BetKind::Odd,
        "low" => BetKind::Low,
        "high" => BetKind::High,
        "d1" | "d2" | "d3" => BetKind::Dozen(input[1..].parse().ok()?),
        "c1" | "c2" | "c3" => BetKind::Column(input[1..].parse().ok()?),
        _ => BetKind::Straight(input.parse().ok()?),
    };
    kind.is_valid().then_some(kind)
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn prompt_u64(prompt: &str) -> Option<u64> {
    loop {
        let input = prompt_line(prompt);
        if input == "q" || input == "quit" {
            return None;
        }
        match input.parse::<u64>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn print_table(table: &Blackjack<&InMemoryLedger>) {
    let dealer = table.dealer_hand();
    let dealer_view = match table.state() {
        RoundState::DealerTurn | RoundState::Finished => format_hand(&dealer),
        _ => table
            .dealer_up_card()
            .map_or_else(|| "(no cards)".to_string(), |card| format!("{} ??", format_card(&card))),
    };
    println!(
        "\nDealer: {dealer_view} (value {})",
        table.dealer_visible_value()
    );

    let hand = table.player_hand();
    println!(
        "You:    {} (value {}) | bet {}\n",
        format_hand(&hand),
        hand.value(),
        table.bet()
    );
}

fn format_hand(hand: &Hand) -> String {
    if hand.is_empty() {
        return "(empty)".to_string();
    }
    hand.cards()
        .iter()
        .map(format_card)
        .collect::<Vec<_>>()
        .join(" ")
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_card(card: &Card) -> String {
    let (suit, color_code) = match card.suit {
        Suit::Hearts => ("H", "31"),
        Suit::Diamonds => ("D", "31"),
        Suit::Clubs => ("C", "32"),
        Suit::Spades => ("S", "34"),
    };
    colorize(&format!("{}{suit}", card.rank_label()), color_code)
}
