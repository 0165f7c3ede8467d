//! Millisecond clock arithmetic
//!
//! The board keeps a free-running millisecond counter advanced by the
//! heartbeat. Deadlines are stored relative to the instant they were armed
//! so that counter wrap-around never produces a false expiry.

/// Milliseconds on the board clock (wraps after ~49 days)
pub type Millis = u32;

/// A one-shot deadline on the board clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Deadline {
    /// Clock value when the deadline was armed
    armed_at: Millis,
    /// Time after `armed_at` at which the deadline expires (None = disarmed)
    span: Option<Millis>,
}

impl Deadline {
    /// A deadline that never expires until armed
    pub const fn disarmed() -> Self {
        Self {
            armed_at: 0,
            span: None,
        }
    }

    /// Arm (or re-arm) the deadline to expire `span` ms after `now`
    pub fn arm(&mut self, now: Millis, span: Millis) {
        self.armed_at = now;
        self.span = Some(span);
    }

    /// Disarm the deadline
    pub fn disarm(&mut self) {
        self.span = None;
    }

    /// Check if the deadline is armed
    pub fn is_armed(&self) -> bool {
        self.span.is_some()
    }

    /// Check if the deadline has passed
    pub fn expired(&self, now: Millis) -> bool {
        match self.span {
            Some(span) => now.wrapping_sub(self.armed_at) >= span,
            None => false,
        }
    }

    /// Time left before expiry (0 once expired or when disarmed)
    pub fn remaining(&self, now: Millis) -> Millis {
        match self.span {
            Some(span) => span.saturating_sub(now.wrapping_sub(self.armed_at)),
            None => 0,
        }
    }
}
