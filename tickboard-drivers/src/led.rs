//! GPIO LED output

use tickboard_core::traits::LedOutput;
use tickboard_hal::{OutputPin, PinLevel};

/// LED driven by a GPIO pin
///
/// The pin can be configured as active-high (default) or active-low.
pub struct PinLed<P> {
    pin: P,
    /// If true, LED ON = pin LOW
    inverted: bool,
    on: bool,
}

impl<P: OutputPin> PinLed<P> {
    /// Create an LED output, initially off
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut led = Self {
            pin,
            inverted,
            on: false,
        };
        led.set_on(false);
        led
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> LedOutput for PinLed<P> {
    fn set_on(&mut self, on: bool) {
        self.on = on;
        self.pin.set_level(PinLevel::from(on != self.inverted));
    }

    fn is_on(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPin {
        high: bool,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_active_high_led() {
        let mut led = PinLed::new_active_high(MockPin { high: true });
        assert!(!led.is_on());
        assert!(!led.pin.is_set_high());

        led.set_on(true);
        assert!(led.is_on());
        assert!(led.pin.is_set_high());
    }

    #[test]
    fn test_active_low_led() {
        let mut led = PinLed::new_active_low(MockPin { high: false });
        assert!(!led.is_on());
        assert!(led.pin.is_set_high());

        led.toggle();
        assert!(led.is_on());
        assert!(!led.release().is_set_high());
    }
}
