//! Button debounce and stuck-input detection
//!
//! Every button channel runs its own instance of the debounce state set on
//! the shared [`sme`](crate::sme) engine. One activation per channel happens
//! per `ButtonTask` alarm, so all timing below is in board milliseconds and
//! independent of the sampling period.
//!
//! A press is recognized after eight consecutive high samples, counting the
//! one that left `Released`. A release needs the low sample that left
//! `Pressed` followed by eight more, since the seed bit must shift out. A
//! press lasting longer than the stuck timeout parks the channel in
//! [`ButtonState::Stuck`] until the first low sample.

pub mod states;
pub mod table;
pub mod task;

pub use states::{ButtonContext, ButtonState, ButtonTiming, DebounceStates, Reason};
pub use table::{notify, BUTTON_TRANSITIONS};
pub use task::{ButtonTask, ChannelSnapshot, TaskStatus};

use crate::time::Millis;
use crate::traits::SampleSource;

/// Inputs the debounce states read: raw samples and the board clock
pub trait ButtonIo {
    /// Read the next raw sample of a channel
    fn read_next_bit(&mut self, channel: usize) -> bool;

    /// Current board time
    fn now_ms(&self) -> Millis;
}

/// A sample source paired with the time of the current activation
pub struct TimedSamples<'a, S: SampleSource + ?Sized> {
    source: &'a mut S,
    now: Millis,
}

impl<'a, S: SampleSource + ?Sized> TimedSamples<'a, S> {
    pub fn new(source: &'a mut S, now: Millis) -> Self {
        Self { source, now }
    }
}

impl<S: SampleSource + ?Sized> ButtonIo for TimedSamples<'_, S> {
    fn read_next_bit(&mut self, channel: usize) -> bool {
        self.source.read_next_bit(channel)
    }

    fn now_ms(&self) -> Millis {
        self.now
    }
}
