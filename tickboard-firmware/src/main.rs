//! Tickboard - demo firmware for RP2040-based boards
//!
//! Four debounced buttons drive four LEDs. The board runs off a fixed
//! heartbeat; button sampling is a software alarm on that heartbeat.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use tickboard_core::config::{parse_config, BoardConfig};
use tickboard_hal_rp2040::{check_pins, PinBank};

use crate::hw::FwBoard;

mod app;
mod channels;
mod hw;
mod tasks;

/// Embedded board description (compiled into firmware)
/// Edit board.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../board.toml");

static BOARD: StaticCell<FwBoard> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tickboard firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    let mut bank = PinBank::from_peripherals(p);
    let board = BOARD.init(hw::build_board(config, &mut bank));

    if let Err(e) = board.init() {
        error!("Board init failed: {:?}", e);
        return;
    }
    info!(
        "Board ready: {} buttons, heartbeat {} ms",
        board.buttons().channels(),
        board.config().timing.heartbeat_ms
    );

    spawner.spawn(tasks::status_task()).unwrap();
    spawner.spawn(tasks::board_task(board)).unwrap();

    info!("All tasks spawned");
}

/// Parse the embedded board description, or fall back to defaults
fn load_config() -> BoardConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            warn!("Embedded config rejected ({:?}), using defaults", e);
            return BoardConfig::new();
        }
    };

    if let Err(e) = config.validate() {
        warn!("Embedded config invalid ({:?}), using defaults", e);
        return BoardConfig::new();
    }
    if let Err(e) = check_pins(&config) {
        warn!("Pin assignment invalid ({:?}), using defaults", e);
        return BoardConfig::new();
    }

    info!(
        "Config loaded: {} buttons, {} LEDs",
        config.buttons.len(),
        config.leds.len()
    );
    config
}
