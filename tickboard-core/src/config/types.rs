//! Board configuration types

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::button::ButtonTiming;
use crate::time::Millis;

/// Maximum buttons per board
pub const MAX_BUTTONS: usize = 8;

/// Maximum LEDs per board
pub const MAX_LEDS: usize = 4;

/// Samples needed to debounce one edge
const DEBOUNCE_SAMPLES: Millis = 8;

/// Configuration error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Key not valid in its section
    InvalidKey,
    /// Value malformed or out of range
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
    /// Too many items (exceeded heapless capacity)
    TooManyItems,
}

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an active-low pin with pull-up, the usual button wiring
    pub const fn active_low_pullup(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: true,
        }
    }
}

/// Heartbeat and button timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingConfig {
    /// Heartbeat period
    pub heartbeat_ms: Millis,
    /// Button sampling period (one debounce step per period)
    pub button_period_ms: Millis,
    /// Longest a debounce window may stay open
    pub debounce_ms: Millis,
    /// Press duration after which a button is reported stuck
    pub stuck_timeout_ms: Millis,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            heartbeat_ms: 1,
            button_period_ms: 10,
            debounce_ms: 600,
            stuck_timeout_ms: 30_000,
        }
    }
}

/// Complete board configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    pub timing: TimingConfig,
    /// Button inputs, channel order
    pub buttons: Vec<PinConfig, MAX_BUTTONS>,
    /// LED outputs, `Led1` first
    pub leds: Vec<PinConfig, MAX_LEDS>,
}

impl BoardConfig {
    /// Default timing, no pins
    pub fn new() -> Self {
        Self::default()
    }

    /// Check timing consistency
    ///
    /// Periods must be non-zero, the button period at least one heartbeat,
    /// the debounce window long enough for eight samples and the stuck
    /// timeout longer than the debounce window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.timing;

        if t.heartbeat_ms == 0 || t.button_period_ms == 0 {
            return Err(ConfigError::InvalidValue);
        }
        if t.button_period_ms < t.heartbeat_ms {
            return Err(ConfigError::InvalidValue);
        }
        if t.debounce_ms < t.button_period_ms.saturating_mul(DEBOUNCE_SAMPLES) {
            return Err(ConfigError::InvalidValue);
        }
        if t.stuck_timeout_ms <= t.debounce_ms {
            return Err(ConfigError::InvalidValue);
        }
        Ok(())
    }

    /// Timing handed to the button task
    pub fn button_timing(&self) -> ButtonTiming {
        ButtonTiming {
            debounce_ms: self.timing.debounce_ms,
            stuck_ms: self.timing.stuck_timeout_ms,
        }
    }
}
