//! Engine configuration options.

extern crate alloc;

use alloc::vec::Vec;
use core::time::Duration;

use tracing::warn;

/// Rounding mode for payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest.
    Nearest,
}

/// How the two starting hands are dealt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DealMode {
    /// Cards come off the top of the shuffled deck in reveal order.
    Straight,
    /// A weighted coin picks the favored side, then both hands are drawn
    /// from rank windows that give that side the stronger start.
    Biased {
        /// Probability that the house is favored, in `0.0..=1.0`.
        house_probability: f64,
    },
}

impl Default for DealMode {
    fn default() -> Self {
        Self::Biased {
            house_probability: 2.0 / 3.0,
        }
    }
}

/// Presentation pacing. Nothing here influences an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timing {
    /// Delay before each initial card is revealed.
    pub card_reveal: Duration,
    /// Delay before each dealer draw.
    pub dealer_draw: Duration,
    /// Time the wheel spins before the result is settled.
    pub spin: Duration,
    /// Full wheel turns before landing on the pocket.
    pub full_rotations: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            card_reveal: Duration::from_millis(500),
            dealer_draw: Duration::from_millis(800),
            spin: Duration::from_millis(4000),
            full_rotations: 5,
        }
    }
}

/// Configuration options for the blackjack table.
///
/// ```
/// use casino_core::{BlackjackOptions, DealMode};
///
/// let options = BlackjackOptions::default()
///     .with_chips(&[10, 20])
///     .with_deal_mode(DealMode::Straight);
/// assert_eq!(options.chips, vec![10, 20]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BlackjackOptions {
    /// Stakes the player may choose from. Empty accepts any positive stake.
    pub chips: Vec<u64>,
    /// Winnings ratio paid on a natural, on top of the returned stake.
    pub blackjack_pays: f64,
    /// Rounding mode for natural payouts.
    pub rounding_blackjack: RoundingMode,
    /// Dealer draws while below this value (soft totals included).
    pub dealer_stands_on: u8,
    /// Initial deal behavior.
    pub deal_mode: DealMode,
    /// Presentation pacing.
    pub timing: Timing,
}

impl Default for BlackjackOptions {
    fn default() -> Self {
        Self {
            chips: alloc::vec![5, 10, 25, 50, 100, 500],
            blackjack_pays: 1.5,
            rounding_blackjack: RoundingMode::Down,
            dealer_stands_on: 17,
            deal_mode: DealMode::default(),
            timing: Timing::default(),
        }
    }
}

impl BlackjackOptions {
    /// Sets the chip denominations.
    #[must_use]
    pub fn with_chips(mut self, chips: &[u64]) -> Self {
        self.chips = chips.to_vec();
        self
    }

    /// Sets the natural payout ratio.
    #[must_use]
    pub fn with_blackjack_pays(mut self, ratio: f64) -> Self {
        self.blackjack_pays = ratio;
        self
    }

    /// Sets the rounding mode for natural payouts.
    #[must_use]
    pub fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Sets the value the dealer stands on.
    #[must_use]
    pub fn with_dealer_stands_on(mut self, value: u8) -> Self {
        self.dealer_stands_on = value;
        self
    }

    /// Sets the initial deal behavior.
    #[must_use]
    pub fn with_deal_mode(mut self, mode: DealMode) -> Self {
        self.deal_mode = mode;
        self
    }

    /// Sets the presentation pacing.
    #[must_use]
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Returns whether `amount` is an acceptable stake.
    #[must_use]
    pub fn is_chip(&self, amount: u64) -> bool {
        self.chips.is_empty() || self.chips.contains(&amount)
    }
}

/// Site setting key for the roulette table minimum.
pub const ROULETTE_MIN_BET: &str = "roulette_min_bet";
/// Site setting key for the roulette table maximum.
pub const ROULETTE_MAX_BET: &str = "roulette_max_bet";
/// Site setting key for the roulette house edge percentage.
pub const ROULETTE_HOUSE_EDGE: &str = "roulette_house_edge";
/// Site setting key for the roulette feature flag.
pub const ROULETTE_ENABLED: &str = "roulette_enabled";

/// Configuration options for the roulette table.
///
/// ```
/// use casino_core::RouletteOptions;
///
/// let options = RouletteOptions::from_site_settings([
///     ("roulette_min_bet", "10"),
///     ("roulette_house_edge", "80"),
/// ]);
/// assert_eq!(options.min_bet, 10);
/// assert_eq!(options.house_edge, 80.0);
/// assert!(options.enabled);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouletteOptions {
    /// Minimum total stake per spin.
    pub min_bet: u64,
    /// Maximum total stake per spin.
    pub max_bet: u64,
    /// Probability, in percent, that a spin takes the house-favored branch.
    pub house_edge: f64,
    /// Whether the table accepts any operation.
    pub enabled: bool,
    /// Number of recent outcomes kept.
    pub history_len: usize,
    /// Presentation pacing.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub timing: Timing,
}

impl Default for RouletteOptions {
    fn default() -> Self {
        Self {
            min_bet: 1,
            max_bet: 1000,
            house_edge: 65.0,
            enabled: true,
            history_len: 10,
            timing: Timing::default(),
        }
    }
}

impl RouletteOptions {
    /// Reads the `roulette_*` site settings, falling back to defaults for
    /// anything missing or unparsable.
    pub fn from_site_settings<'a, I>(settings: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = Self::default();
        for (key, raw) in settings {
            let value = raw.trim();
            match key {
                ROULETTE_MIN_BET => match parse_amount(value) {
                    Some(amount) => options.min_bet = amount,
                    None => warn!(key, value, "unparsable setting, using default"),
                },
                ROULETTE_MAX_BET => match parse_amount(value) {
                    Some(amount) => options.max_bet = amount,
                    None => warn!(key, value, "unparsable setting, using default"),
                },
                ROULETTE_HOUSE_EDGE => match value.parse::<f64>() {
                    Ok(edge) if edge.is_finite() => options.house_edge = edge.clamp(0.0, 100.0),
                    _ => warn!(key, value, "unparsable setting, using default"),
                },
                ROULETTE_ENABLED => options.enabled = !is_disabled_flag(value),
                _ => {}
            }
        }
        options
    }

    /// Sets the table minimum.
    #[must_use]
    pub const fn with_min_bet(mut self, amount: u64) -> Self {
        self.min_bet = amount;
        self
    }

    /// Sets the table maximum.
    #[must_use]
    pub const fn with_max_bet(mut self, amount: u64) -> Self {
        self.max_bet = amount;
        self
    }

    /// Sets the house edge percentage, clamped to `0..=100`.
    #[must_use]
    pub fn with_house_edge(mut self, percent: f64) -> Self {
        self.house_edge = percent.clamp(0.0, 100.0);
        self
    }

    /// Sets whether the table is enabled.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets how many recent outcomes are kept.
    #[must_use]
    pub const fn with_history_len(mut self, len: usize) -> Self {
        self.history_len = len;
        self
    }

    /// Sets the presentation pacing.
    #[must_use]
    pub const fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }
}

fn parse_amount(value: &str) -> Option<u64> {
    if let Ok(amount) = value.parse::<u64>() {
        return Some(amount);
    }
    // Decimal columns arrive as "10.00".
    match value.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Some(amount as u64),
        _ => None,
    }
}

fn is_disabled_flag(value: &str) -> bool {
    ["false", "0", "off", "disabled", "no"]
        .iter()
        .any(|flag| value.eq_ignore_ascii_case(flag))
}
