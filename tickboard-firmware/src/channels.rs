//! Inter-task communication channels

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use tickboard_core::event::Event;

/// Channel capacity for application events
const EVENT_CHANNEL_SIZE: usize = 8;

/// Button notifications, for status logging
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, Event, EVENT_CHANNEL_SIZE> =
    Channel::new();
