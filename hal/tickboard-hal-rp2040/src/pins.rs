//! Dynamic pin allocation for config-driven hardware setup
//!
//! Lets the firmware take GPIO pins by the numbers found in `board.toml`
//! instead of hardcoding them.

use embassy_rp::gpio::AnyPin;
use embassy_rp::{Peri, Peripherals};
use tickboard_core::config::PinConfig;

use crate::gpio::{PinError, RpInput, RpOutput, GPIO_COUNT};

/// Holds every GPIO pin until it is taken by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
}

impl PinBank {
    /// Move all GPIO pins out of the peripherals
    pub fn from_peripherals(p: Peripherals) -> Self {
        Self {
            pins: [
                Some(p.PIN_0.into()),
                Some(p.PIN_1.into()),
                Some(p.PIN_2.into()),
                Some(p.PIN_3.into()),
                Some(p.PIN_4.into()),
                Some(p.PIN_5.into()),
                Some(p.PIN_6.into()),
                Some(p.PIN_7.into()),
                Some(p.PIN_8.into()),
                Some(p.PIN_9.into()),
                Some(p.PIN_10.into()),
                Some(p.PIN_11.into()),
                Some(p.PIN_12.into()),
                Some(p.PIN_13.into()),
                Some(p.PIN_14.into()),
                Some(p.PIN_15.into()),
                Some(p.PIN_16.into()),
                Some(p.PIN_17.into()),
                Some(p.PIN_18.into()),
                Some(p.PIN_19.into()),
                Some(p.PIN_20.into()),
                Some(p.PIN_21.into()),
                Some(p.PIN_22.into()),
                Some(p.PIN_23.into()),
                Some(p.PIN_24.into()),
                Some(p.PIN_25.into()),
                Some(p.PIN_26.into()),
                Some(p.PIN_27.into()),
                Some(p.PIN_28.into()),
                Some(p.PIN_29.into()),
            ],
        }
    }

    /// Take a pin by number
    pub fn take(&mut self, pin: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        self.pins
            .get_mut(pin as usize)
            .ok_or(PinError::OutOfRange(pin))?
            .take()
            .ok_or(PinError::InUse(pin))
    }

    /// Check if a pin is still available
    pub fn is_available(&self, pin: u8) -> bool {
        matches!(self.pins.get(pin as usize), Some(Some(_)))
    }

    /// Take a configured button input
    pub fn input(&mut self, config: &PinConfig) -> Result<RpInput, PinError> {
        Ok(RpInput::new(self.take(config.pin)?, config.pull_up))
    }

    /// Take a configured LED output
    pub fn output(&mut self, config: &PinConfig) -> Result<RpOutput, PinError> {
        Ok(RpOutput::new(self.take(config.pin)?))
    }
}
