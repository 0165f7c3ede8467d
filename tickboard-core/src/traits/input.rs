//! Button sample sources

/// Source of raw button samples, one bit per channel per read
///
/// `true` means the button is electrically pressed. Reads are destructive:
/// a source backed by a recorded pattern advances one bit per call.
/// Implementations return `false` for channels they do not have.
pub trait SampleSource {
    /// Read the next raw sample of a channel
    fn read_next_bit(&mut self, channel: usize) -> bool;

    /// Number of channels this source provides
    fn channels(&self) -> usize;
}

impl<T: SampleSource + ?Sized> SampleSource for &mut T {
    fn read_next_bit(&mut self, channel: usize) -> bool {
        (**self).read_next_bit(channel)
    }

    fn channels(&self) -> usize {
        (**self).channels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(bool);

    impl SampleSource for Constant {
        fn read_next_bit(&mut self, channel: usize) -> bool {
            channel == 0 && self.0
        }

        fn channels(&self) -> usize {
            1
        }
    }

    fn first_two<S: SampleSource>(mut source: S) -> (bool, bool, usize) {
        (source.read_next_bit(0), source.read_next_bit(3), source.channels())
    }

    #[test]
    fn test_forward_through_reference() {
        let mut source = Constant(true);
        assert_eq!(first_two(&mut source), (true, false, 1));
    }
}
