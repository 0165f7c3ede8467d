//! Transition table of the debounce state set

use super::states::{ButtonState, Reason};
use crate::event::{Event, EventId, EventSink};
use crate::sme::Transition;

use ButtonState::*;

/// Button transitions, shared by every channel
pub static BUTTON_TRANSITIONS: [Transition<ButtonState, Reason>; 10] = [
    Transition::new(Start, EventId::ButtonTask, Reason::None, Released),
    Transition::new(Released, EventId::ButtonTask, Reason::TwitchNoted, DebouncePress),
    Transition::new(DebouncePress, EventId::BtnPressed, Reason::Debounced, Pressed)
        .with_action(notify),
    Transition::new(DebouncePress, EventId::BtnReleased, Reason::Debounced, Released),
    Transition::new(DebouncePress, EventId::ButtonTask, Reason::Timeout, Released),
    Transition::new(Pressed, EventId::ButtonTask, Reason::TwitchNoted, DebounceRelease),
    Transition::new(Pressed, EventId::ButtonTask, Reason::Timeout, Stuck).with_action(notify),
    Transition::new(DebounceRelease, EventId::BtnReleased, Reason::Debounced, Released)
        .with_action(notify),
    Transition::new(DebounceRelease, EventId::BtnPressed, Reason::Debounced, Pressed),
    Transition::new(Stuck, EventId::ButtonTask, Reason::ButtonUnstuck, Released)
        .with_action(notify),
];

/// Forward a button status change upstream
///
/// The outbound id is derived from the exit reason; anything that does not
/// map to a notification is dropped. The payload (channel index) is kept.
pub fn notify(sink: &mut dyn EventSink, event: Event, reason: Reason) {
    let id = match reason {
        Reason::Debounced => match event.id {
            EventId::BtnPressed | EventId::BtnReleased => event.id,
            _ => EventId::None,
        },
        Reason::Timeout => EventId::BtnStuck,
        Reason::ButtonUnstuck => EventId::BtnUnstuck,
        Reason::None | Reason::TwitchNoted => EventId::None,
    };

    if id.is_none() {
        log_warn!("button: nothing to notify for {:?}/{:?}", event, reason);
        return;
    }

    if let Err(err) = sink.post(Event::new(id, event.data)) {
        log_warn!("button: notification dropped: {:?}", err);
    }
}
