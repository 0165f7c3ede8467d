//! Transition tables
//!
//! Rows are tried in order and the first match wins. Overlapping rows are
//! legal; put specific payload rows before wildcard rows for the same
//! state, event and reason.

use crate::event::{Event, EventId, EventSink};

/// Payload matcher of a transition row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataMatch {
    /// Any payload
    Any,
    /// Exactly this payload
    Exactly(u32),
}

impl DataMatch {
    /// Check a payload against this matcher
    pub fn matches(self, data: u32) -> bool {
        match self {
            DataMatch::Any => true,
            DataMatch::Exactly(expected) => expected == data,
        }
    }
}

/// Side effect run when a row is taken
///
/// Receives the event and reason reported by the exiting state.
pub type TransitionAction<R> = fn(&mut dyn EventSink, Event, R);

/// One row of a transition table
#[derive(Debug, Clone, Copy)]
pub struct Transition<S, R> {
    /// State that must be exiting
    pub from: S,
    /// Event id reported by the exit action
    pub event: EventId,
    /// Payload reported by the exit action
    pub data: DataMatch,
    /// Exit reason reported by the exit action
    pub reason: R,
    /// State to enter next
    pub to: S,
    /// Optional side effect
    pub action: Option<TransitionAction<R>>,
}

impl<S: PartialEq, R: PartialEq> Transition<S, R> {
    /// Row without a side effect, matching any payload
    pub const fn new(from: S, event: EventId, reason: R, to: S) -> Self {
        Self {
            from,
            event,
            data: DataMatch::Any,
            reason,
            to,
            action: None,
        }
    }

    /// Restrict the row to one payload value
    pub const fn with_data(mut self, data: u32) -> Self {
        self.data = DataMatch::Exactly(data);
        self
    }

    /// Attach a side effect
    pub const fn with_action(mut self, action: TransitionAction<R>) -> Self {
        self.action = Some(action);
        self
    }

    /// Check if this row applies to an exiting state
    pub fn matches(&self, from: &S, event: &Event, reason: &R) -> bool {
        self.from == *from
            && self.event == event.id
            && self.data.matches(event.data)
            && self.reason == *reason
    }
}

/// Find the first row that applies to an exiting state
pub fn find_transition<'t, S: PartialEq, R: PartialEq>(
    table: &'t [Transition<S, R>],
    from: &S,
    event: &Event,
    reason: &R,
) -> Option<&'t Transition<S, R>> {
    table.iter().find(|row| row.matches(from, event, reason))
}
