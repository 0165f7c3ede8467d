//! Concrete board wiring
//!
//! Binds the configured pins to the board's sample source and LED bank.
//! Without configured buttons the board falls back to simulated bouncing
//! buttons.

use defmt::*;

use tickboard_core::board::{Board, NUM_LEDS};
use tickboard_core::config::BoardConfig;
use tickboard_core::traits::{LedOutput, SampleSource};
use tickboard_drivers::{PatternSampler, PinLed, PinSampler, Profile};
use tickboard_hal_rp2040::{PinBank, RpInput, RpOutput};

/// Button channels driven by the firmware
pub const BUTTONS: usize = 4;

pub type FwBoard = Board<BoardLed, Inputs, BUTTONS>;

/// Where button samples come from
pub enum Inputs {
    Pins(PinSampler<RpInput, BUTTONS>),
    Simulated(PatternSampler<BUTTONS>),
}

impl SampleSource for Inputs {
    fn read_next_bit(&mut self, channel: usize) -> bool {
        match self {
            Inputs::Pins(pins) => pins.read_next_bit(channel),
            Inputs::Simulated(sim) => sim.read_next_bit(channel),
        }
    }

    fn channels(&self) -> usize {
        BUTTONS
    }
}

/// An LED slot; slots without a configured pin only keep their state
pub struct BoardLed {
    pin: Option<PinLed<RpOutput>>,
    on: bool,
}

impl LedOutput for BoardLed {
    fn set_on(&mut self, on: bool) {
        self.on = on;
        if let Some(pin) = self.pin.as_mut() {
            pin.set_on(on);
        }
    }

    fn is_on(&self) -> bool {
        self.on
    }
}

/// Take the configured pins and assemble the board
pub fn build_board(config: BoardConfig, bank: &mut PinBank) -> FwBoard {
    let inputs = match take_inputs(&config, bank) {
        Some(pins) => Inputs::Pins(pins),
        None => {
            warn!("No complete button wiring, simulating bouncing buttons");
            Inputs::Simulated(PatternSampler::new(Profile::Noisy))
        }
    };

    let leds: [BoardLed; NUM_LEDS] = core::array::from_fn(|i| {
        let pin = config
            .leds
            .get(i)
            .and_then(|cfg| match bank.output(cfg) {
                Ok(out) => Some(PinLed::new(out, cfg.inverted)),
                Err(e) => {
                    warn!("LED {} unavailable: {:?}", i, e);
                    None
                }
            });
        BoardLed { pin, on: false }
    });

    Board::new(config, inputs, leds)
}

fn take_inputs(config: &BoardConfig, bank: &mut PinBank) -> Option<PinSampler<RpInput, BUTTONS>> {
    if config.buttons.len() < BUTTONS {
        return None;
    }

    let mut pins: heapless::Vec<RpInput, BUTTONS> = heapless::Vec::new();
    let mut active_low = [false; BUTTONS];
    for (i, cfg) in config.buttons.iter().take(BUTTONS).enumerate() {
        match bank.input(cfg) {
            Ok(pin) => {
                active_low[i] = cfg.inverted;
                pins.push(pin).ok()?;
            }
            Err(e) => {
                warn!("Button {} unavailable: {:?}", i, e);
                return None;
            }
        }
    }

    let pins: [RpInput; BUTTONS] = pins.into_array().ok()?;
    Some(PinSampler::new(pins, active_low))
}
