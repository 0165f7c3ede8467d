//! GPIO adapters and pin checking

use embassy_rp::gpio::{AnyPin, Input, Level, Output, Pull};
use embassy_rp::Peri;
use heapless::FnvIndexSet;
use tickboard_core::config::BoardConfig;
use tickboard_hal::{InputPin, OutputPin};

/// Maximum number of GPIO pins on RP2040
pub const GPIO_COUNT: usize = 30;

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    OutOfRange(u8),
    /// Pin already taken
    InUse(u8),
}

/// Check that every configured pin exists and is used only once
pub fn check_pins(config: &BoardConfig) -> Result<(), PinError> {
    let mut seen: FnvIndexSet<u8, 32> = FnvIndexSet::new();

    for pin in config.buttons.iter().chain(config.leds.iter()) {
        if pin.pin as usize >= GPIO_COUNT {
            return Err(PinError::OutOfRange(pin.pin));
        }
        match seen.insert(pin.pin) {
            Ok(true) => {}
            Ok(false) => return Err(PinError::InUse(pin.pin)),
            Err(_) => return Err(PinError::OutOfRange(pin.pin)),
        }
    }
    Ok(())
}

/// Embassy input as a button pin
pub struct RpInput {
    input: Input<'static>,
}

impl RpInput {
    pub fn new(pin: Peri<'static, AnyPin>, pull_up: bool) -> Self {
        let pull = if pull_up { Pull::Up } else { Pull::None };
        Self {
            input: Input::new(pin, pull),
        }
    }
}

impl InputPin for RpInput {
    fn is_high(&self) -> bool {
        self.input.is_high()
    }
}

/// Embassy output as an LED pin
pub struct RpOutput {
    output: Output<'static>,
}

impl RpOutput {
    /// Create an output, initially low
    pub fn new(pin: Peri<'static, AnyPin>) -> Self {
        Self {
            output: Output::new(pin, Level::Low),
        }
    }
}

impl OutputPin for RpOutput {
    fn set_high(&mut self) {
        self.output.set_high();
    }

    fn set_low(&mut self) {
        self.output.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.output.is_set_high()
    }
}
