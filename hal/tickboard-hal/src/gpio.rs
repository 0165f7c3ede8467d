//! GPIO pin abstractions
//!
//! Buttons are read through [`InputPin`], LEDs are driven through
//! [`OutputPin`]. Neither trait knows about polarity; active-low wiring is
//! handled one layer up, where the pin is bound to a logical button or LED.

/// Electrical level of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinLevel {
    Low,
    High,
}

impl PinLevel {
    /// Level as seen through an optional inversion
    pub fn is_active(self, active_low: bool) -> bool {
        matches!(
            (self, active_low),
            (PinLevel::High, false) | (PinLevel::Low, true)
        )
    }
}

impl From<bool> for PinLevel {
    fn from(high: bool) -> Self {
        if high {
            PinLevel::High
        } else {
            PinLevel::Low
        }
    }
}

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Set the pin to a specific level
    fn set_level(&mut self, level: PinLevel) {
        match level {
            PinLevel::High => self.set_high(),
            PinLevel::Low => self.set_low(),
        }
    }

    /// Toggle the pin state
    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
///
/// Reads must not block; the button sampler calls this once per channel
/// per sampling tick.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }

    /// Current level of the pin
    fn level(&self) -> PinLevel {
        PinLevel::from(self.is_high())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakePin(bool);

    impl OutputPin for FakePin {
        fn set_high(&mut self) {
            self.0 = true;
        }

        fn set_low(&mut self) {
            self.0 = false;
        }

        fn is_set_high(&self) -> bool {
            self.0
        }
    }

    impl InputPin for FakePin {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_toggle() {
        let mut pin = FakePin(false);
        pin.toggle();
        assert!(pin.is_set_high());
        pin.toggle();
        assert!(pin.is_set_low());
    }

    #[test]
    fn test_set_level() {
        let mut pin = FakePin(false);
        pin.set_level(PinLevel::High);
        assert_eq!(pin.level(), PinLevel::High);
        pin.set_level(PinLevel::Low);
        assert!(pin.is_low());
    }

    #[test]
    fn test_active_low() {
        assert!(PinLevel::Low.is_active(true));
        assert!(!PinLevel::High.is_active(true));
        assert!(PinLevel::High.is_active(false));
        assert!(!PinLevel::Low.is_active(false));
    }
}
