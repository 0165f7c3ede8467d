//! Board task
//!
//! Owns the board and acts as its tick source: one heartbeat per period,
//! then every pending event is handled before the next tick.

use defmt::*;
use embassy_time::{Duration, Ticker};

use tickboard_core::event::Event;

use crate::app::App;
use crate::channels::EVENT_CHANNEL;
use crate::hw::FwBoard;

#[embassy_executor::task]
pub async fn board_task(board: &'static mut FwBoard) {
    info!("Board task started");

    let period = board.config().timing.heartbeat_ms.max(1);
    let mut ticker = Ticker::every(Duration::from_millis(period as u64));
    let mut app = App::new();

    loop {
        ticker.next().await;

        if let Err(e) = board.heartbeat() {
            error!("Heartbeat failed: {:?}", e);
            continue;
        }

        loop {
            let event = match board.poll() {
                Ok(Some(event)) => event,
                Ok(None) => break,
                Err(e) => {
                    error!("Poll failed: {:?}", e);
                    break;
                }
            };

            if let Err(e) = app.handle(board, event) {
                warn!("Event {:?} not handled: {:?}", event, e);
            }
            forward(event);
        }

        if let Err(e) = app.service(board) {
            warn!("Service failed: {:?}", e);
        }
    }
}

/// Hand an event to the status task; dropped if it is behind
fn forward(event: Event) {
    if EVENT_CHANNEL.try_send(event).is_err() {
        debug!("Status channel full, dropping {:?}", event);
    }
}
