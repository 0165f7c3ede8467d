//! The debounce state set

use super::ButtonIo;
use crate::event::{Event, EventId};
use crate::sme::{ExitReport, Progress, StateSet};
use crate::time::{Deadline, Millis};

/// Debounce states of one button channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonState {
    /// One-shot pass-through at power-up
    #[default]
    Start,
    /// Idle, waiting for activity
    Released,
    /// Activity seen while released, collecting samples
    DebouncePress,
    /// Debounced press, watching for release or a stuck input
    Pressed,
    /// Activity seen while pressed, collecting samples
    DebounceRelease,
    /// Held far too long, waiting for the first low sample
    Stuck,
}

/// Why a button state exited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reason {
    #[default]
    None,
    /// A sample contradicted the current level
    TwitchNoted,
    /// Eight agreeing samples collected
    Debounced,
    /// The state's deadline passed
    Timeout,
    /// A stuck button was let go
    ButtonUnstuck,
}

/// Private data of one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonContext {
    /// Most recent samples, newest in bit 0
    pub shift: u8,
    /// Window for the debounce states
    pub debounce: Deadline,
    /// Stuck-input timeout while pressed
    pub stuck: Deadline,
    /// Event id reported on exit
    pub exit_event: EventId,
    /// Reason reported on exit
    pub reason: Reason,
}

/// Debounce and stuck timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonTiming {
    /// Longest a debounce state may collect samples
    pub debounce_ms: Millis,
    /// How long a press may last before it is considered stuck
    pub stuck_ms: Millis,
}

impl Default for ButtonTiming {
    fn default() -> Self {
        // 500 ms of samples plus 100 ms of slack at a 10 ms sampling period
        Self {
            debounce_ms: 600,
            stuck_ms: 30_000,
        }
    }
}

/// Handlers of the debounce states
#[derive(Debug, Clone, Copy, Default)]
pub struct DebounceStates {
    timing: ButtonTiming,
}

impl DebounceStates {
    pub fn new(timing: ButtonTiming) -> Self {
        Self { timing }
    }

    pub fn timing(&self) -> ButtonTiming {
        self.timing
    }
}

impl StateSet for DebounceStates {
    type State = ButtonState;
    type Reason = Reason;
    type Context = ButtonContext;
    type Io<'a> = dyn ButtonIo + 'a;

    const INITIAL: ButtonState = ButtonState::Start;

    fn enter(
        &self,
        state: ButtonState,
        _channel: usize,
        ctx: &mut ButtonContext,
        io: &mut (dyn ButtonIo + '_),
        event: &Event,
    ) {
        ctx.exit_event = event.id;
        ctx.reason = Reason::None;

        match state {
            ButtonState::DebouncePress | ButtonState::DebounceRelease => {
                ctx.shift = 1;
                ctx.debounce.arm(io.now_ms(), self.timing.debounce_ms);
            }
            ButtonState::Pressed => ctx.stuck.arm(io.now_ms(), self.timing.stuck_ms),
            ButtonState::Start | ButtonState::Released | ButtonState::Stuck => {}
        }
    }

    fn operate(
        &self,
        state: ButtonState,
        channel: usize,
        ctx: &mut ButtonContext,
        io: &mut (dyn ButtonIo + '_),
    ) -> Progress {
        match state {
            ButtonState::Start => Progress::Leave,

            ButtonState::Released => {
                if io.read_next_bit(channel) {
                    ctx.reason = Reason::TwitchNoted;
                    Progress::Leave
                } else {
                    Progress::Stay
                }
            }

            ButtonState::DebouncePress | ButtonState::DebounceRelease => {
                ctx.shift = (ctx.shift << 1) | u8::from(io.read_next_bit(channel));

                if ctx.shift == 0x00 {
                    ctx.exit_event = EventId::BtnReleased;
                    ctx.reason = Reason::Debounced;
                } else if ctx.shift == 0xFF {
                    ctx.exit_event = EventId::BtnPressed;
                    ctx.reason = Reason::Debounced;
                } else if ctx.debounce.expired(io.now_ms()) {
                    ctx.reason = Reason::Timeout;
                } else {
                    return Progress::Stay;
                }
                Progress::Leave
            }

            ButtonState::Pressed => {
                if !io.read_next_bit(channel) {
                    ctx.reason = Reason::TwitchNoted;
                } else if ctx.stuck.expired(io.now_ms()) {
                    ctx.reason = Reason::Timeout;
                } else {
                    return Progress::Stay;
                }
                Progress::Leave
            }

            ButtonState::Stuck => {
                if io.read_next_bit(channel) {
                    Progress::Stay
                } else {
                    ctx.reason = Reason::ButtonUnstuck;
                    Progress::Leave
                }
            }
        }
    }

    fn exit(
        &self,
        state: ButtonState,
        channel: usize,
        ctx: &mut ButtonContext,
        _io: &mut (dyn ButtonIo + '_),
    ) -> ExitReport<Reason> {
        match state {
            ButtonState::DebouncePress | ButtonState::DebounceRelease => ctx.debounce.disarm(),
            ButtonState::Pressed => ctx.stuck.disarm(),
            _ => {}
        }
        ExitReport::new(Event::new(ctx.exit_event, channel as u32), ctx.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        bit: bool,
        now: Millis,
        reads: usize,
    }

    impl ButtonIo for Fixed {
        fn read_next_bit(&mut self, _channel: usize) -> bool {
            self.reads += 1;
            self.bit
        }

        fn now_ms(&self) -> Millis {
            self.now
        }
    }

    fn io(bit: bool, now: Millis) -> Fixed {
        Fixed { bit, now, reads: 0 }
    }

    fn tick() -> Event {
        Event::bare(EventId::ButtonTask)
    }

    #[test]
    fn test_entry_records_provoking_event() {
        let states = DebounceStates::default();
        let mut ctx = ButtonContext {
            exit_event: EventId::BtnPressed,
            reason: Reason::Debounced,
            ..Default::default()
        };
        states.enter(ButtonState::Released, 0, &mut ctx, &mut io(false, 0), &tick());
        assert_eq!(ctx.exit_event, EventId::ButtonTask);
        assert_eq!(ctx.reason, Reason::None);
    }

    #[test]
    fn test_debounce_entry_seeds_and_arms() {
        let states = DebounceStates::default();
        let mut ctx = ButtonContext::default();
        let mut fixed = io(true, 100);
        states.enter(ButtonState::DebouncePress, 0, &mut ctx, &mut fixed, &tick());

        assert_eq!(ctx.shift, 0x01);
        assert!(ctx.debounce.is_armed());
        assert_eq!(ctx.debounce.remaining(100), 600);
        assert_eq!(fixed.reads, 0);
    }

    #[test]
    fn test_start_leaves_without_sampling() {
        let states = DebounceStates::default();
        let mut ctx = ButtonContext::default();
        let mut fixed = io(true, 0);
        assert_eq!(
            states.operate(ButtonState::Start, 0, &mut ctx, &mut fixed),
            Progress::Leave
        );
        assert_eq!(fixed.reads, 0);
        assert_eq!(ctx.reason, Reason::None);
    }

    #[test]
    fn test_shift_priority_zero_before_timeout() {
        let states = DebounceStates::default();
        let mut ctx = ButtonContext::default();
        states.enter(ButtonState::DebounceRelease, 0, &mut ctx, &mut io(false, 0), &tick());
        ctx.shift = 0x80;

        // Deadline already passed, but the all-zero pattern wins
        let progress = states.operate(ButtonState::DebounceRelease, 0, &mut ctx, &mut io(false, 5_000));
        assert_eq!(progress, Progress::Leave);
        assert_eq!(ctx.reason, Reason::Debounced);
        assert_eq!(ctx.exit_event, EventId::BtnReleased);
    }

    #[test]
    fn test_debounce_timeout_keeps_task_event() {
        let states = DebounceStates::default();
        let mut ctx = ButtonContext::default();
        states.enter(ButtonState::DebouncePress, 0, &mut ctx, &mut io(false, 0), &tick());

        assert_eq!(
            states.operate(ButtonState::DebouncePress, 0, &mut ctx, &mut io(true, 599)),
            Progress::Stay
        );
        assert_eq!(
            states.operate(ButtonState::DebouncePress, 0, &mut ctx, &mut io(false, 600)),
            Progress::Leave
        );
        assert_eq!(ctx.reason, Reason::Timeout);
        assert_eq!(ctx.exit_event, EventId::ButtonTask);
    }

    #[test]
    fn test_pressed_release_beats_stuck() {
        let states = DebounceStates::default();
        let mut ctx = ButtonContext::default();
        states.enter(ButtonState::Pressed, 0, &mut ctx, &mut io(true, 0), &tick());

        let progress = states.operate(ButtonState::Pressed, 0, &mut ctx, &mut io(false, 60_000));
        assert_eq!(progress, Progress::Leave);
        assert_eq!(ctx.reason, Reason::TwitchNoted);
    }

    #[test]
    fn test_exit_reports_channel_and_disarms() {
        let states = DebounceStates::default();
        let mut ctx = ButtonContext::default();
        states.enter(ButtonState::Pressed, 3, &mut ctx, &mut io(true, 0), &tick());
        states.operate(ButtonState::Pressed, 3, &mut ctx, &mut io(true, 30_000));

        let report = states.exit(ButtonState::Pressed, 3, &mut ctx, &mut io(true, 30_000));
        assert_eq!(report.event, Event::new(EventId::ButtonTask, 3));
        assert_eq!(report.reason, Reason::Timeout);
        assert!(!ctx.stuck.is_armed());
    }
}
