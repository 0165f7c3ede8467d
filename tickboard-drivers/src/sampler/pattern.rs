//! Simulated button input
//!
//! Stands in for real switches on boards without them. A press or release
//! queues a recorded bounce pattern for the channel; once the pattern has
//! been read out the channel reports the level it settled at.

use tickboard_core::traits::SampleSource;

/// Most bits a channel can have queued
pub const MAX_PENDING_BITS: u8 = 64;

/// Bounce pattern, read least significant bit first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pattern {
    pub bits: u64,
    pub len: u8,
}

/// Which recorded bounce patterns to replay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Profile {
    /// A couple of bounces, then a solid level
    #[default]
    Clean,
    /// Long, dirty contact noise
    Noisy,
}

impl Profile {
    pub const fn press(self) -> Pattern {
        match self {
            Profile::Clean => Pattern { bits: 0xFF9, len: 12 },
            Profile::Noisy => Pattern {
                bits: 0xFF7F_7EFB_DDA0_3F01,
                len: 64,
            },
        }
    }

    pub const fn release(self) -> Pattern {
        match self {
            Profile::Clean => Pattern { bits: 0x006, len: 12 },
            Profile::Noisy => Pattern {
                bits: 0x0001_0010_1020_844A,
                len: 64,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Line {
    pending: u64,
    len: u8,
    held: bool,
}

impl Line {
    /// Queue as much of a pattern as fits; returns the bits dropped
    fn append(&mut self, pattern: Pattern) -> u8 {
        let wanted = pattern.len.min(MAX_PENDING_BITS);
        let room = MAX_PENDING_BITS - self.len;
        let take = wanted.min(room);
        if take > 0 {
            let mask = if take == 64 { u64::MAX } else { (1u64 << take) - 1 };
            self.pending |= (pattern.bits & mask) << self.len;
            self.len += take;
        }
        pattern.len - take
    }

    fn next(&mut self) -> bool {
        if self.len == 0 {
            return self.held;
        }
        let bit = self.pending & 1 != 0;
        self.pending >>= 1;
        self.len -= 1;
        bit
    }
}

/// Simulated bouncing buttons
pub struct PatternSampler<const N: usize> {
    profile: Profile,
    lines: [Line; N],
}

impl<const N: usize> PatternSampler<N> {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            lines: [Line::default(); N],
        }
    }

    /// Simulate pressing a button
    ///
    /// Returns the number of pattern bits that did not fit behind bits
    /// still queued; the held level is updated regardless.
    pub fn press(&mut self, channel: usize) -> u8 {
        self.actuate(channel, true)
    }

    /// Simulate letting go of a button
    pub fn release(&mut self, channel: usize) -> u8 {
        self.actuate(channel, false)
    }

    fn actuate(&mut self, channel: usize, pressed: bool) -> u8 {
        let pattern = if pressed {
            self.profile.press()
        } else {
            self.profile.release()
        };
        match self.lines.get_mut(channel) {
            Some(line) => {
                line.held = pressed;
                line.append(pattern)
            }
            None => pattern.len,
        }
    }

    /// Bits still queued for a channel
    pub fn pending(&self, channel: usize) -> u8 {
        self.lines.get(channel).map(|line| line.len).unwrap_or(0)
    }

    /// Level a channel settles at once its queue is empty
    pub fn is_held(&self, channel: usize) -> bool {
        self.lines.get(channel).map(|line| line.held).unwrap_or(false)
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = profile;
    }
}

impl<const N: usize> SampleSource for PatternSampler<N> {
    fn read_next_bit(&mut self, channel: usize) -> bool {
        self.lines.get_mut(channel).map(Line::next).unwrap_or(false)
    }

    fn channels(&self) -> usize {
        N
    }
}
