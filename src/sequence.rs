//! Timed reveal sequencing with cooperative cancellation.
//!
//! Engine operations are timing-free. The drivers that pace them for
//! presentation (`Blackjack::reveal_initial`, `Blackjack::play_dealer`,
//! `Roulette::spin_and_settle`) run through a [`Sequencer`], which checks a
//! [`CancelToken`] before and after every pause. Once the token is
//! cancelled no further engine call is made.

extern crate alloc;

use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;

use crate::sound::{SoundCue, SoundSink};

/// Shared cancellation flag.
///
/// Clones observe the same flag, so the UI can keep one clone and hand
/// another to the sequence it tears down.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates an uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels every sequence holding this token.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns whether the token has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Waits out a presentation delay.
pub trait Pacer {
    /// Blocks (or yields) for `delay`.
    fn pause(&mut self, delay: Duration);
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    fn pause(&mut self, delay: Duration) {
        (**self).pause(delay);
    }
}

/// A pacer that never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl Pacer for Immediate {
    fn pause(&mut self, _delay: Duration) {}
}

/// A pacer that sleeps the current thread.
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

#[cfg(feature = "std")]
impl Pacer for ThreadPacer {
    fn pause(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

/// Drives a timed sequence of steps.
pub struct Sequencer<'a, P> {
    token: CancelToken,
    pacer: P,
    sound: Option<&'a dyn SoundSink>,
    muted: bool,
}

impl<'a, P: Pacer> Sequencer<'a, P> {
    /// Creates a silent sequencer.
    pub const fn new(token: CancelToken, pacer: P) -> Self {
        Self {
            token,
            pacer,
            sound: None,
            muted: false,
        }
    }

    /// Routes cues to `sink` unless `muted`.
    #[must_use]
    pub fn with_sound(mut self, sink: &'a dyn SoundSink, muted: bool) -> Self {
        self.sound = Some(sink);
        self.muted = muted;
        self
    }

    /// The token this sequencer observes.
    pub const fn token(&self) -> &CancelToken {
        &self.token
    }

    /// Returns whether the sequence has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Waits `delay`, then plays `cue`.
    ///
    /// Returns `false` without playing anything if the token was cancelled
    /// before or during the wait; the caller must then stop.
    pub fn step(&mut self, delay: Duration, cue: Option<SoundCue>) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        self.pacer.pause(delay);
        if self.token.is_cancelled() {
            return false;
        }
        if let Some(cue) = cue {
            self.cue(cue);
        }
        true
    }

    /// Plays `cue` immediately unless muted.
    pub fn cue(&self, cue: SoundCue) {
        if self.muted {
            return;
        }
        if let Some(sink) = self.sound {
            sink.play(cue);
        }
    }
}
