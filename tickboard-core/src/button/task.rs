//! Multi-channel button task

use super::states::{ButtonContext, ButtonState, ButtonTiming, DebounceStates};
use super::table::BUTTON_TRANSITIONS;
use super::ButtonIo;
use crate::event::{Event, EventId, EventSink};
use crate::sme::{Engine, Phase};

/// Whether the button task should keep being driven
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskStatus {
    Running,
    /// At least one channel exited without a matching transition; its
    /// driving alarm should be disabled until re-armed
    ///
    /// All channels share one alarm, so a miss on any channel freezes
    /// every channel, not only the one that missed.
    Halted,
}

/// Read-only view of one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelSnapshot {
    pub state: ButtonState,
    pub phase: Phase,
    pub context: ButtonContext,
}

/// Debounces `N` buttons, one engine channel each
pub struct ButtonTask<const N: usize> {
    engine: Engine<'static, DebounceStates, N>,
}

impl<const N: usize> Default for ButtonTask<N> {
    fn default() -> Self {
        Self::new(ButtonTiming::default())
    }
}

impl<const N: usize> ButtonTask<N> {
    /// Create a task with every channel at `Start`
    pub fn new(timing: ButtonTiming) -> Self {
        Self {
            engine: Engine::new(DebounceStates::new(timing), &BUTTON_TRANSITIONS),
        }
    }

    /// Handle one `ButtonTask` activation
    ///
    /// Every channel advances by one phase, highest index first. Other
    /// event ids are ignored.
    pub fn run(&mut self, event: Event, io: &mut dyn ButtonIo, sink: &mut dyn EventSink) -> TaskStatus {
        if event.id != EventId::ButtonTask {
            log_debug!("button: ignoring {:?}", event);
            return TaskStatus::Running;
        }

        match self.engine.sweep(event, io, sink) {
            0 => TaskStatus::Running,
            misses => {
                log_warn!("button: {} channel(s) without transition", misses);
                TaskStatus::Halted
            }
        }
    }

    /// Current state of a channel
    pub fn state(&self, channel: usize) -> Option<ButtonState> {
        self.engine.state(channel)
    }

    /// Snapshot of a channel
    pub fn channel(&self, channel: usize) -> Option<ChannelSnapshot> {
        Some(ChannelSnapshot {
            state: self.engine.state(channel)?,
            phase: self.engine.phase(channel)?,
            context: *self.engine.context(channel)?,
        })
    }

    /// Force a channel back to `Start`
    pub fn reset(&mut self, channel: usize) -> bool {
        self.engine.reset(channel)
    }

    /// Number of channels
    pub const fn channels(&self) -> usize {
        N
    }

    pub fn timing(&self) -> ButtonTiming {
        self.engine.state_set().timing()
    }
}
