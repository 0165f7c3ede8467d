//! Configuration types
//!
//! Board-agnostic configuration: timing of the heartbeat and the button
//! task plus the pins of the button and LED banks.

pub mod parse;
pub mod types;

pub use parse::{parse_config, parse_pin};
pub use types::*;
