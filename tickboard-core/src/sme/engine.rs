//! Engine driving one state-machine instance per channel

use super::phase::Phase;
use super::table::{find_transition, Transition};
use super::Tag;
use crate::event::{Event, EventSink};

/// Result of a state's per-tick work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Progress {
    /// Keep running the operational phase
    Stay,
    /// Termination condition met; run the exit action next
    Leave,
}

/// What an exit action reports to the engine
///
/// The event id, payload and reason together select the next table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExitReport<R> {
    pub event: Event,
    pub reason: R,
}

impl<R> ExitReport<R> {
    pub const fn new(event: Event, reason: R) -> Self {
        Self { event, reason }
    }
}

/// Behavior of a family of states
///
/// Implementors dispatch on the state tag. Handlers get the channel index,
/// the channel's private context and whatever I/O the family needs; they
/// never see other channels.
pub trait StateSet {
    /// State tags
    type State: Tag;
    /// Exit reasons
    type Reason: Tag;
    /// Per-channel private data
    type Context: Default;
    /// Inputs and clocks shared by all channels, borrowed per activation
    type Io<'a>: ?Sized;

    /// State every channel starts in
    const INITIAL: Self::State;

    /// Entry action; `event` is the activation that entered the state
    fn enter(
        &self,
        state: Self::State,
        channel: usize,
        ctx: &mut Self::Context,
        io: &mut Self::Io<'_>,
        event: &Event,
    );

    /// Per-tick work while operational
    fn operate(
        &self,
        state: Self::State,
        channel: usize,
        ctx: &mut Self::Context,
        io: &mut Self::Io<'_>,
    ) -> Progress;

    /// Exit action
    fn exit(
        &self,
        state: Self::State,
        channel: usize,
        ctx: &mut Self::Context,
        io: &mut Self::Io<'_>,
    ) -> ExitReport<Self::Reason>;
}

/// Outcome of a single activation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step<S> {
    /// Channel index out of range; nothing ran
    Ignored,
    /// Still in `state`, now in `phase`
    Stayed { state: S, phase: Phase },
    /// Exit completed and a row was taken
    Advanced { from: S, to: S },
    /// Exit completed but no row matched; the state re-enters next time
    NoTransition { state: S },
}

#[derive(Debug, Clone, Copy)]
struct Slot<S> {
    state: S,
    phase: Phase,
}

/// Table-driven engine for `N` channels sharing one state family
pub struct Engine<'t, M: StateSet, const N: usize> {
    set: M,
    table: &'t [Transition<M::State, M::Reason>],
    slots: [Slot<M::State>; N],
    contexts: [M::Context; N],
}

impl<'t, M: StateSet, const N: usize> Engine<'t, M, N> {
    /// Create an engine with every channel in the initial state
    pub fn new(set: M, table: &'t [Transition<M::State, M::Reason>]) -> Self {
        Self {
            set,
            table,
            slots: [Slot {
                state: M::INITIAL,
                phase: Phase::Uninitialized,
            }; N],
            contexts: core::array::from_fn(|_| M::Context::default()),
        }
    }

    /// Number of channels
    pub const fn channels(&self) -> usize {
        N
    }

    /// Run one activation of one channel
    ///
    /// Exactly one of entry, operational work or exit runs. After the exit
    /// action the table is searched in order for the first row matching
    /// the exiting state and the reported event, payload and reason.
    pub fn step(
        &mut self,
        channel: usize,
        event: Event,
        io: &mut M::Io<'_>,
        sink: &mut dyn EventSink,
    ) -> Step<M::State> {
        let (Some(slot), Some(ctx)) = (self.slots.get_mut(channel), self.contexts.get_mut(channel))
        else {
            log_warn!("sme: channel {} out of range", channel);
            return Step::Ignored;
        };

        let state = slot.state;
        match slot.phase {
            Phase::Uninitialized | Phase::Finished => {
                self.set.enter(state, channel, ctx, io, &event);
                slot.phase = Phase::Operational;
            }
            Phase::Operational => {
                if self.set.operate(state, channel, ctx, io) == Progress::Leave {
                    slot.phase = Phase::Exit;
                }
            }
            Phase::Exit => {
                let report = self.set.exit(state, channel, ctx, io);
                slot.phase = Phase::Finished;

                let Some(row) = find_transition(self.table, &state, &report.event, &report.reason)
                else {
                    log_warn!(
                        "sme: ch {} no transition from {:?} on {:?}/{:?}",
                        channel,
                        state,
                        report.event,
                        report.reason
                    );
                    return Step::NoTransition { state };
                };

                if let Some(action) = row.action {
                    action(sink, report.event, report.reason);
                }
                slot.state = row.to;
                log_debug!("sme: ch {} {:?} -> {:?}", channel, state, row.to);
                return Step::Advanced { from: state, to: row.to };
            }
        }

        Step::Stayed {
            state,
            phase: slot.phase,
        }
    }

    /// Activate every channel once, highest index first
    ///
    /// Each channel sees `event` with its own index as payload. Returns the
    /// number of channels whose exit found no table row.
    pub fn sweep(&mut self, event: Event, io: &mut M::Io<'_>, sink: &mut dyn EventSink) -> usize {
        let mut misses = 0;
        for channel in (0..N).rev() {
            let event = Event::new(event.id, channel as u32);
            if let Step::NoTransition { .. } = self.step(channel, event, io, sink) {
                misses += 1;
            }
        }
        misses
    }

    /// Put one channel back into the initial state
    pub fn reset(&mut self, channel: usize) -> bool {
        match (self.slots.get_mut(channel), self.contexts.get_mut(channel)) {
            (Some(slot), Some(ctx)) => {
                slot.state = M::INITIAL;
                slot.phase = Phase::Uninitialized;
                *ctx = M::Context::default();
                true
            }
            _ => false,
        }
    }

    /// Current state of a channel
    pub fn state(&self, channel: usize) -> Option<M::State> {
        self.slots.get(channel).map(|slot| slot.state)
    }

    /// Current phase of a channel
    pub fn phase(&self, channel: usize) -> Option<Phase> {
        self.slots.get(channel).map(|slot| slot.phase)
    }

    /// Private context of a channel
    pub fn context(&self, channel: usize) -> Option<&M::Context> {
        self.contexts.get(channel)
    }

    /// The transition table
    pub fn table(&self) -> &'t [Transition<M::State, M::Reason>] {
        self.table
    }

    /// The state family
    pub fn state_set(&self) -> &M {
        &self.set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventId, EventQueue};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Light {
        Off,
        On,
        Broken,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Why {
        Flip,
        Fault,
    }

    #[derive(Default)]
    struct Lamp {
        entries: u32,
        ticks_left: u32,
        entered_on: EventId,
    }

    /// What the next exit reports; the payload is offset by the channel index
    struct Script {
        why: Why,
        data: u32,
    }

    /// Stays operational for `dwell` ticks then leaves
    struct Blinker {
        dwell: u32,
    }

    impl StateSet for Blinker {
        type State = Light;
        type Reason = Why;
        type Context = Lamp;
        type Io<'a> = Script;

        const INITIAL: Light = Light::Off;

        fn enter(&self, _state: Light, _ch: usize, ctx: &mut Lamp, _io: &mut Script, event: &Event) {
            ctx.entries += 1;
            ctx.ticks_left = self.dwell;
            ctx.entered_on = event.id;
        }

        fn operate(&self, _state: Light, _ch: usize, ctx: &mut Lamp, _io: &mut Script) -> Progress {
            if ctx.ticks_left == 0 {
                Progress::Leave
            } else {
                ctx.ticks_left -= 1;
                Progress::Stay
            }
        }

        fn exit(&self, _state: Light, ch: usize, ctx: &mut Lamp, io: &mut Script) -> ExitReport<Why> {
            ExitReport::new(Event::new(ctx.entered_on, io.data + ch as u32), io.why)
        }
    }

    fn announce(sink: &mut dyn EventSink, event: Event, _why: Why) {
        let _ = sink.post(Event::new(EventId::BtnPressed, event.data));
    }

    const TABLE: [Transition<Light, Why>; 4] = [
        Transition::new(Light::Off, EventId::ButtonTask, Why::Flip, Light::On).with_action(announce),
        Transition::new(Light::On, EventId::ButtonTask, Why::Flip, Light::Off).with_data(9),
        Transition::new(Light::On, EventId::ButtonTask, Why::Flip, Light::Broken),
        Transition::new(Light::On, EventId::ButtonTask, Why::Fault, Light::Broken),
    ];

    fn tick() -> Event {
        Event::bare(EventId::ButtonTask)
    }

    #[test]
    fn test_phase_sequence() {
        let mut engine: Engine<'_, Blinker, 1> = Engine::new(Blinker { dwell: 0 }, &TABLE);
        let mut io = Script { why: Why::Flip, data: 0 };
        let mut sink = EventQueue::<4>::new();

        assert_eq!(engine.phase(0), Some(Phase::Uninitialized));
        assert_eq!(
            engine.step(0, tick(), &mut io, &mut sink),
            Step::Stayed { state: Light::Off, phase: Phase::Operational }
        );
        assert_eq!(
            engine.step(0, tick(), &mut io, &mut sink),
            Step::Stayed { state: Light::Off, phase: Phase::Exit }
        );
        assert_eq!(
            engine.step(0, tick(), &mut io, &mut sink),
            Step::Advanced { from: Light::Off, to: Light::On }
        );
        assert_eq!(engine.phase(0), Some(Phase::Finished));
        assert_eq!(engine.state(0), Some(Light::On));

        // The new state's entry runs on the following activation
        engine.step(0, tick(), &mut io, &mut sink);
        assert_eq!(engine.phase(0), Some(Phase::Operational));
        assert_eq!(engine.context(0).unwrap().entries, 2);
    }

    #[test]
    fn test_operational_dwell() {
        let mut engine: Engine<'_, Blinker, 1> = Engine::new(Blinker { dwell: 3 }, &TABLE);
        let mut io = Script { why: Why::Flip, data: 0 };
        let mut sink = EventQueue::<4>::new();

        // entry + 3 stays + leave + exit
        for _ in 0..5 {
            engine.step(0, tick(), &mut io, &mut sink);
            assert_eq!(engine.state(0), Some(Light::Off));
        }
        assert_eq!(engine.phase(0), Some(Phase::Exit));
        engine.step(0, tick(), &mut io, &mut sink);
        assert_eq!(engine.state(0), Some(Light::On));
    }

    #[test]
    fn test_action_runs_with_exit_report() {
        let mut engine: Engine<'_, Blinker, 1> = Engine::new(Blinker { dwell: 0 }, &TABLE);
        let mut io = Script { why: Why::Flip, data: 5 };
        let mut sink = EventQueue::<4>::new();

        for _ in 0..3 {
            engine.step(0, tick(), &mut io, &mut sink);
        }
        assert_eq!(sink.pop(), Some(Event::new(EventId::BtnPressed, 5)));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_first_matching_row_wins() {
        let mut io = Script { why: Why::Flip, data: 9 };
        let mut sink = EventQueue::<4>::new();

        let mut engine: Engine<'_, Blinker, 1> = Engine::new(Blinker { dwell: 0 }, &TABLE);
        for _ in 0..6 {
            engine.step(0, tick(), &mut io, &mut sink);
        }
        assert_eq!(engine.state(0), Some(Light::Off));

        io.data = 3;
        let mut engine: Engine<'_, Blinker, 1> = Engine::new(Blinker { dwell: 0 }, &TABLE);
        for _ in 0..6 {
            engine.step(0, tick(), &mut io, &mut sink);
        }
        assert_eq!(engine.state(0), Some(Light::Broken));
    }

    #[test]
    fn test_table_miss_keeps_state() {
        let mut engine: Engine<'_, Blinker, 1> = Engine::new(Blinker { dwell: 0 }, &TABLE);
        let mut io = Script { why: Why::Fault, data: 0 };
        let mut sink = EventQueue::<4>::new();

        engine.step(0, tick(), &mut io, &mut sink);
        engine.step(0, tick(), &mut io, &mut sink);
        assert_eq!(
            engine.step(0, tick(), &mut io, &mut sink),
            Step::NoTransition { state: Light::Off }
        );
        assert_eq!(engine.state(0), Some(Light::Off));
        assert!(sink.is_empty());

        // Re-enters the same state on the next activation
        engine.step(0, tick(), &mut io, &mut sink);
        assert_eq!(engine.context(0).unwrap().entries, 2);
        assert_eq!(engine.phase(0), Some(Phase::Operational));
    }

    #[test]
    fn test_out_of_range_channel() {
        let mut engine: Engine<'_, Blinker, 2> = Engine::new(Blinker { dwell: 0 }, &TABLE);
        let mut io = Script { why: Why::Flip, data: 0 };
        let mut sink = EventQueue::<4>::new();

        assert_eq!(engine.step(2, tick(), &mut io, &mut sink), Step::Ignored);
        assert_eq!(engine.state(2), None);
        assert!(!engine.reset(2));
        assert_eq!(engine.phase(0), Some(Phase::Uninitialized));
        assert_eq!(engine.phase(1), Some(Phase::Uninitialized));
    }

    #[test]
    fn test_sweep_and_reset() {
        let mut engine: Engine<'_, Blinker, 3> = Engine::new(Blinker { dwell: 0 }, &TABLE);
        let mut io = Script { why: Why::Flip, data: 0 };
        let mut sink = EventQueue::<4>::new();

        for _ in 0..3 {
            assert_eq!(engine.sweep(tick(), &mut io, &mut sink), 0);
        }
        for ch in 0..3 {
            assert_eq!(engine.state(ch), Some(Light::On));
        }
        // Announcements come out highest channel first, payload is the index
        assert_eq!(sink.pop(), Some(Event::new(EventId::BtnPressed, 2)));
        assert_eq!(sink.pop(), Some(Event::new(EventId::BtnPressed, 1)));
        assert_eq!(sink.pop(), Some(Event::new(EventId::BtnPressed, 0)));

        assert!(engine.reset(1));
        assert_eq!(engine.state(1), Some(Light::Off));
        assert_eq!(engine.phase(1), Some(Phase::Uninitialized));
        assert_eq!(engine.context(1).unwrap().entries, 0);
        assert_eq!(engine.state(0), Some(Light::On));
    }
}
