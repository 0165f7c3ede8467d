//! Software alarms
//!
//! A software alarm is a reloading countdown. The heartbeat ticks it; on
//! reaching zero it posts its event and starts over. Alarms are disabled
//! rather than destroyed, so a halted task can be re-armed later.

use crate::event::{Event, EventId, EventSink};

/// Alarm tick count (one tick per heartbeat)
pub type Ticks = u32;

/// Reloading countdown that posts an event on expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SoftwareAlarm {
    /// Ticks left before the next expiry
    remaining: Ticks,
    /// Value loaded into `remaining` after each expiry
    reload: Ticks,
    /// Event posted on expiry
    event: EventId,
    /// Disabled alarms ignore ticks
    enabled: bool,
}

impl SoftwareAlarm {
    /// Create an enabled alarm
    ///
    /// `initial` is the delay before the first expiry, `reload` the period
    /// after that. A zero reload is treated as one tick.
    pub const fn new(initial: Ticks, reload: Ticks, event: EventId) -> Self {
        let reload = if reload == 0 { 1 } else { reload };
        let initial = if initial == 0 { reload } else { initial };
        Self {
            remaining: initial,
            reload,
            event,
            enabled: true,
        }
    }

    /// Create an enabled alarm whose first expiry is one period away
    pub const fn periodic(period: Ticks, event: EventId) -> Self {
        Self::new(period, period, event)
    }

    /// Advance the alarm by one tick
    ///
    /// Returns true if the alarm expired on this tick. At most one event is
    /// posted per tick. A refused post still counts as an expiry.
    pub fn tick(&mut self, sink: &mut dyn EventSink) -> bool {
        if !self.enabled {
            return false;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return false;
        }

        self.remaining = self.reload;
        if let Err(err) = sink.post(Event::bare(self.event)) {
            log_warn!("alarm {:?} expiry dropped: {:?}", self.event, err);
        }
        true
    }

    /// Stop the alarm (idempotent)
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Resume the alarm from where it was stopped
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Check if the alarm is running
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Ticks left before the next expiry
    pub fn remaining(&self) -> Ticks {
        self.remaining
    }

    /// Reload period in ticks
    pub fn reload(&self) -> Ticks {
        self.reload
    }

    /// Event posted on expiry
    pub fn event(&self) -> EventId {
        self.event
    }
}
