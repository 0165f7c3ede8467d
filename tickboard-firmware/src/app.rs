//! Demo application
//!
//! Reacts to button notifications with the LEDs:
//! - a press toggles the LED with the button's number
//! - a stuck button lights every LED until it is let go

use defmt::*;

use tickboard_core::board::{BoardError, Led};
use tickboard_core::event::{Event, EventId};
use tickboard_core::time::Millis;

use crate::hw::{FwBoard, Inputs, BUTTONS};

/// How long a halted button task stays halted before it is re-armed
const REARM_DELAY_MS: Millis = 1_000;

/// Simulated press cadence
const DEMO_PERIOD_MS: Millis = 2_000;
const DEMO_HOLD_MS: Millis = 500;

pub struct App {
    halted_since: Option<Millis>,
    next_demo: Millis,
    demo_channel: usize,
    demo_pressed: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            halted_since: None,
            next_demo: DEMO_PERIOD_MS,
            demo_channel: 0,
            demo_pressed: false,
        }
    }

    /// Apply one application event to the board
    pub fn handle(&mut self, board: &mut FwBoard, event: Event) -> Result<(), BoardError> {
        let channel = event.data as usize;
        match event.id {
            EventId::BtnPressed => {
                info!("Button {} pressed", channel);
                board.toggle_led(Led::try_from(channel % Led::ALL.len())?)?;
            }
            EventId::BtnReleased => debug!("Button {} released", channel),
            EventId::BtnStuck => {
                warn!("Button {} stuck", channel);
                for led in Led::ALL {
                    board.set_led(led, true)?;
                }
            }
            EventId::BtnUnstuck => {
                info!("Button {} recovered", channel);
                for led in Led::ALL {
                    board.set_led(led, false)?;
                }
            }
            EventId::None | EventId::ButtonTask => {}
        }
        Ok(())
    }

    /// Periodic housekeeping, once per heartbeat
    pub fn service(&mut self, board: &mut FwBoard) -> Result<(), BoardError> {
        let now = board.now();

        // Re-armed channels resume where they stopped
        if board.button_task_halted() {
            match self.halted_since {
                None => {
                    warn!("Button task halted at {} ms", now);
                    self.halted_since = Some(now);
                }
                Some(since) if now.wrapping_sub(since) >= REARM_DELAY_MS => {
                    info!("Re-arming button task");
                    board.rearm_buttons()?;
                    self.halted_since = None;
                }
                Some(_) => {}
            }
        }

        if let Inputs::Simulated(sim) = board.samples_mut() {
            self.drive_demo(sim, now);
        }
        Ok(())
    }

    /// Press and release the simulated buttons in turn
    fn drive_demo(&mut self, sim: &mut tickboard_drivers::PatternSampler<BUTTONS>, now: Millis) {
        if now.wrapping_sub(self.next_demo) as i32 >= 0 {
            if self.demo_pressed {
                sim.release(self.demo_channel);
                self.demo_channel = (self.demo_channel + 1) % BUTTONS;
                self.next_demo = now.wrapping_add(DEMO_PERIOD_MS - DEMO_HOLD_MS);
            } else {
                sim.press(self.demo_channel);
                self.next_demo = now.wrapping_add(DEMO_HOLD_MS);
            }
            self.demo_pressed = !self.demo_pressed;
        }
    }
}
