//! Synthesized audio cues.
//!
//! The crate never plays audio itself. A [`SoundSink`] supplied by the UI
//! receives cues; whether the player has muted sound is decided by the
//! caller at each call site (see [`crate::sequence::Sequencer::with_sound`]).

/// Oscillator shape for a synthesized tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Waveform {
    /// Pure sine.
    Sine,
    /// Square wave.
    Square,
    /// Triangle wave.
    Triangle,
    /// Sawtooth wave.
    Sawtooth,
}

/// One note of a cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tone {
    /// Pitch in hertz.
    pub frequency_hz: u16,
    /// Offset from the start of the cue.
    pub start_ms: u16,
    /// Length of the note.
    pub duration_ms: u16,
    /// Oscillator shape.
    pub waveform: Waveform,
}

const fn tone(frequency_hz: u16, start_ms: u16, duration_ms: u16, waveform: Waveform) -> Tone {
    Tone {
        frequency_hz,
        start_ms,
        duration_ms,
        waveform,
    }
}

/// A short sound effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// A chip is placed on the table.
    Chip,
    /// A card slides out of the deck.
    CardDeal,
    /// A face-down card turns over.
    CardFlip,
    /// The player won.
    Win,
    /// The player lost.
    Lose,
    /// The stake was returned.
    Push,
    /// The player was dealt a natural.
    Blackjack,
    /// The wheel starts spinning.
    WheelSpin,
    /// The ball drops into a pocket.
    BallSettle,
    /// An action was refused.
    Error,
}

const CHIP: &[Tone] = &[
    tone(1200, 0, 40, Waveform::Triangle),
    tone(1600, 30, 40, Waveform::Triangle),
];
const CARD_DEAL: &[Tone] = &[tone(800, 0, 60, Waveform::Sawtooth)];
const CARD_FLIP: &[Tone] = &[
    tone(600, 0, 50, Waveform::Triangle),
    tone(900, 40, 50, Waveform::Triangle),
];
const WIN: &[Tone] = &[
    tone(523, 0, 120, Waveform::Sine),
    tone(659, 120, 120, Waveform::Sine),
    tone(784, 240, 200, Waveform::Sine),
];
const LOSE: &[Tone] = &[
    tone(220, 0, 250, Waveform::Square),
    tone(165, 200, 300, Waveform::Square),
];
const PUSH: &[Tone] = &[
    tone(440, 0, 150, Waveform::Sine),
    tone(440, 180, 150, Waveform::Sine),
];
const BLACKJACK: &[Tone] = &[
    tone(523, 0, 100, Waveform::Sine),
    tone(659, 100, 100, Waveform::Sine),
    tone(784, 200, 100, Waveform::Sine),
    tone(1047, 300, 300, Waveform::Sine),
];
const WHEEL_SPIN: &[Tone] = &[
    tone(300, 0, 400, Waveform::Sawtooth),
    tone(450, 300, 400, Waveform::Sawtooth),
];
const BALL_SETTLE: &[Tone] = &[
    tone(1000, 0, 30, Waveform::Triangle),
    tone(700, 60, 80, Waveform::Triangle),
];
const ERROR: &[Tone] = &[tone(150, 0, 200, Waveform::Square)];

impl SoundCue {
    /// The notes that make up the cue.
    #[must_use]
    pub const fn tones(&self) -> &'static [Tone] {
        match self {
            Self::Chip => CHIP,
            Self::CardDeal => CARD_DEAL,
            Self::CardFlip => CARD_FLIP,
            Self::Win => WIN,
            Self::Lose => LOSE,
            Self::Push => PUSH,
            Self::Blackjack => BLACKJACK,
            Self::WheelSpin => WHEEL_SPIN,
            Self::BallSettle => BALL_SETTLE,
            Self::Error => ERROR,
        }
    }

    /// Total length of the cue.
    #[must_use]
    pub fn duration_ms(&self) -> u16 {
        self.tones()
            .iter()
            .map(|t| t.start_ms + t.duration_ms)
            .max()
            .unwrap_or(0)
    }
}

/// Receiver of sound cues, owned by the composing UI.
pub trait SoundSink {
    /// Plays a cue.
    fn play(&self, cue: SoundCue);
}

/// A sink that discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl SoundSink for SilentSink {
    fn play(&self, _cue: SoundCue) {}
}

impl<S: SoundSink + ?Sized> SoundSink for &S {
    fn play(&self, cue: SoundCue) {
        (**self).play(cue);
    }
}
