//! Events posted between the board's tasks
//!
//! An event is an identifier plus a 32-bit payload. For button events the
//! payload is the channel index of the button.

use heapless::Deque;

/// Event identifiers known to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum EventId {
    /// No event (never posted)
    #[default]
    None = 0,
    /// Button sampling alarm expired; drives the button task
    ButtonTask = 1,
    /// Debounced press recognized
    BtnPressed = 2,
    /// Debounced release recognized
    BtnReleased = 3,
    /// Button held far longer than any legitimate press
    BtnStuck = 4,
    /// Stuck button let go
    BtnUnstuck = 5,
}

impl EventId {
    /// Parse an identifier from its raw value
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(EventId::None),
            1 => Some(EventId::ButtonTask),
            2 => Some(EventId::BtnPressed),
            3 => Some(EventId::BtnReleased),
            4 => Some(EventId::BtnStuck),
            5 => Some(EventId::BtnUnstuck),
            _ => None,
        }
    }

    /// Raw identifier value
    pub fn as_raw(self) -> u8 {
        self as u8
    }

    /// Check if this is the "no event" identifier
    pub fn is_none(self) -> bool {
        self == EventId::None
    }

    /// Check if this event reports a button status change
    pub fn is_button_notification(self) -> bool {
        matches!(
            self,
            EventId::BtnPressed | EventId::BtnReleased | EventId::BtnStuck | EventId::BtnUnstuck
        )
    }
}

/// An event with its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Event {
    /// What happened
    pub id: EventId,
    /// Event-specific payload (button events carry the channel index)
    pub data: u32,
}

impl Event {
    /// Create a new event
    pub const fn new(id: EventId, data: u32) -> Self {
        Self { id, data }
    }

    /// Create an event with an empty payload
    pub const fn bare(id: EventId) -> Self {
        Self { id, data: 0 }
    }
}

/// Reason a post was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PostError {
    /// The queue has no free slot; the event is handed back
    QueueFull(Event),
}

/// Anything events can be posted to
pub trait EventSink {
    /// Post an event
    ///
    /// Posting never blocks. Callers on the tick path treat it as
    /// fire-and-forget and only log a refused post.
    fn post(&mut self, event: Event) -> Result<(), PostError>;
}

/// Bounded FIFO of pending events
#[derive(Debug)]
pub struct EventQueue<const N: usize> {
    events: Deque<Event, N>,
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EventQueue<N> {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
        }
    }

    /// Take the oldest pending event
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if no events are pending
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop all pending events
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Iterate pending events, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }
}

impl<const N: usize> EventSink for EventQueue<N> {
    fn post(&mut self, event: Event) -> Result<(), PostError> {
        self.events.push_back(event).map_err(PostError::QueueFull)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_ids() {
        for raw in 0..=5u8 {
            let id = EventId::from_raw(raw).unwrap();
            assert_eq!(id.as_raw(), raw);
        }
        assert_eq!(EventId::from_raw(6), None);
        assert!(EventId::None.is_none());
        assert!(!EventId::ButtonTask.is_none());
    }

    #[test]
    fn test_button_notifications() {
        assert!(EventId::BtnPressed.is_button_notification());
        assert!(EventId::BtnUnstuck.is_button_notification());
        assert!(!EventId::ButtonTask.is_button_notification());
        assert!(!EventId::None.is_button_notification());
    }

    #[test]
    fn test_queue_fifo() {
        let mut queue: EventQueue<4> = EventQueue::new();
        queue.post(Event::new(EventId::BtnPressed, 1)).unwrap();
        queue.post(Event::new(EventId::BtnReleased, 1)).unwrap();

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some(Event::new(EventId::BtnPressed, 1)));
        assert_eq!(queue.pop(), Some(Event::new(EventId::BtnReleased, 1)));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_queue_full_hands_event_back() {
        let mut queue: EventQueue<1> = EventQueue::new();
        queue.post(Event::bare(EventId::ButtonTask)).unwrap();

        let overflow = Event::new(EventId::BtnStuck, 3);
        assert_eq!(queue.post(overflow), Err(PostError::QueueFull(overflow)));
        assert_eq!(queue.len(), 1);
    }
}
