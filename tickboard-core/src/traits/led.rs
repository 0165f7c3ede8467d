//! LED output trait

/// A single on/off indicator
pub trait LedOutput {
    /// Turn the LED on or off
    fn set_on(&mut self, on: bool);

    /// Check if the LED is currently on
    fn is_on(&self) -> bool;

    /// Invert the LED
    fn toggle(&mut self) {
        let on = self.is_on();
        self.set_on(!on);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Latch(bool);

    impl LedOutput for Latch {
        fn set_on(&mut self, on: bool) {
            self.0 = on;
        }

        fn is_on(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_toggle() {
        let mut led = Latch::default();
        led.toggle();
        assert!(led.is_on());
        led.toggle();
        assert!(!led.is_on());
    }
}
