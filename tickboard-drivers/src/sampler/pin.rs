//! Sampling buttons from GPIO inputs

use tickboard_core::traits::SampleSource;
use tickboard_hal::InputPin;

/// One input pin per button channel
pub struct PinSampler<P, const N: usize> {
    pins: [P; N],
    /// Per channel: pressed = pin LOW
    active_low: [bool; N],
}

impl<P: InputPin, const N: usize> PinSampler<P, N> {
    pub fn new(pins: [P; N], active_low: [bool; N]) -> Self {
        Self { pins, active_low }
    }

    /// All channels wired active-low, the usual pull-up button wiring
    pub fn new_active_low(pins: [P; N]) -> Self {
        Self::new(pins, [true; N])
    }
}

impl<P: InputPin, const N: usize> SampleSource for PinSampler<P, N> {
    fn read_next_bit(&mut self, channel: usize) -> bool {
        match (self.pins.get(channel), self.active_low.get(channel)) {
            (Some(pin), Some(&active_low)) => pin.level().is_active(active_low),
            _ => false,
        }
    }

    fn channels(&self) -> usize {
        N
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct MockInput<'a>(&'a Cell<bool>);

    impl InputPin for MockInput<'_> {
        fn is_high(&self) -> bool {
            self.0.get()
        }
    }

    #[test]
    fn test_polarity() {
        let a = Cell::new(false);
        let b = Cell::new(false);
        let mut sampler = PinSampler::new([MockInput(&a), MockInput(&b)], [true, false]);

        assert!(sampler.read_next_bit(0));
        assert!(!sampler.read_next_bit(1));

        a.set(true);
        b.set(true);
        assert!(!sampler.read_next_bit(0));
        assert!(sampler.read_next_bit(1));
    }

    #[test]
    fn test_out_of_range_reads_low() {
        let a = Cell::new(true);
        let mut sampler = PinSampler::new_active_low([MockInput(&a)]);
        assert_eq!(sampler.channels(), 1);
        assert!(!sampler.read_next_bit(1));
    }
}
