//! Status task
//!
//! Keeps a running count of button notifications and logs it.

use defmt::*;

use tickboard_core::event::EventId;

use crate::channels::EVENT_CHANNEL;
use crate::hw::BUTTONS;

#[embassy_executor::task]
pub async fn status_task() {
    info!("Status task started");

    let mut presses = [0u32; BUTTONS];
    let mut stuck = 0u32;

    loop {
        let event = EVENT_CHANNEL.receive().await;
        let channel = event.data as usize;

        match event.id {
            EventId::BtnPressed => {
                if let Some(count) = presses.get_mut(channel) {
                    *count += 1;
                }
                info!("Presses: {:?}", presses);
            }
            EventId::BtnStuck => {
                stuck += 1;
                warn!("Stuck buttons so far: {}", stuck);
            }
            _ => {}
        }
    }
}
