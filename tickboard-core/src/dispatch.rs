//! Heartbeat dispatcher
//!
//! Owns the board clock, the software alarms and the event queue. The
//! periodic tick source calls [`Dispatcher::heartbeat`]; whoever runs the
//! application loop drains events with [`Dispatcher::next_event`].

use heapless::Vec;

use crate::alarm::{SoftwareAlarm, Ticks};
use crate::event::{Event, EventId, EventQueue, EventSink, PostError};
use crate::time::Millis;

/// Handle to an alarm registered with a [`Dispatcher`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmId(u8);

impl AlarmId {
    /// Index of the alarm in registration order
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Alarm registration failed because the alarm table is full
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmTableFull;

/// Clock, alarms and event queue driven by the heartbeat
#[derive(Debug)]
pub struct Dispatcher<const ALARMS: usize, const QUEUE: usize> {
    /// Milliseconds per heartbeat
    heartbeat_ms: Millis,
    /// Board clock
    now: Millis,
    /// Registered alarms
    alarms: Vec<SoftwareAlarm, ALARMS>,
    /// Pending events
    queue: EventQueue<QUEUE>,
}

impl<const ALARMS: usize, const QUEUE: usize> Dispatcher<ALARMS, QUEUE> {
    /// Create a dispatcher with the given heartbeat period
    pub fn new(heartbeat_ms: Millis) -> Self {
        Self {
            heartbeat_ms: heartbeat_ms.max(1),
            now: 0,
            alarms: Vec::new(),
            queue: EventQueue::new(),
        }
    }

    /// Register an alarm that fires every `period_ms`
    ///
    /// The period is rounded down to whole heartbeats (minimum one).
    pub fn register(&mut self, period_ms: Millis, event: EventId) -> Result<AlarmId, AlarmTableFull> {
        let ticks: Ticks = (period_ms / self.heartbeat_ms).max(1);
        let id = AlarmId(self.alarms.len() as u8);
        self.alarms
            .push(SoftwareAlarm::periodic(ticks, event))
            .map_err(|_| AlarmTableFull)?;
        log_debug!("alarm {} registered: {} ticks -> {:?}", id.index(), ticks, event);
        Ok(id)
    }

    /// Run one heartbeat: advance the clock and tick every alarm once
    ///
    /// Returns the number of alarms that expired.
    pub fn heartbeat(&mut self) -> usize {
        self.now = self.now.wrapping_add(self.heartbeat_ms);

        let mut expired = 0;
        for alarm in self.alarms.iter_mut() {
            if alarm.tick(&mut self.queue) {
                expired += 1;
            }
        }
        expired
    }

    /// Take the oldest pending event
    pub fn next_event(&mut self) -> Option<Event> {
        self.queue.pop()
    }

    /// Number of pending events
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Current board clock
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Milliseconds per heartbeat
    pub fn heartbeat_ms(&self) -> Millis {
        self.heartbeat_ms
    }

    /// Stop an alarm
    pub fn disable(&mut self, id: AlarmId) {
        if let Some(alarm) = self.alarms.get_mut(id.index()) {
            if alarm.is_enabled() {
                log_warn!("alarm {} disabled", id.index());
            }
            alarm.disable();
        }
    }

    /// Resume a stopped alarm
    pub fn enable(&mut self, id: AlarmId) {
        if let Some(alarm) = self.alarms.get_mut(id.index()) {
            alarm.enable();
        }
    }

    /// Check if an alarm is running (unknown ids report false)
    pub fn is_enabled(&self, id: AlarmId) -> bool {
        self.alarms
            .get(id.index())
            .map(|alarm| alarm.is_enabled())
            .unwrap_or(false)
    }

    /// Inspect a registered alarm
    pub fn alarm(&self, id: AlarmId) -> Option<&SoftwareAlarm> {
        self.alarms.get(id.index())
    }

    /// Mutable access to the event queue, for posting from outside the
    /// heartbeat
    pub fn queue(&mut self) -> &mut EventQueue<QUEUE> {
        &mut self.queue
    }
}

impl<const ALARMS: usize, const QUEUE: usize> EventSink for Dispatcher<ALARMS, QUEUE> {
    fn post(&mut self, event: Event) -> Result<(), PostError> {
        self.queue.post(event)
    }
}
