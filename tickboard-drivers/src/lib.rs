//! Driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in tickboard-core:
//!
//! - Button sample sources (GPIO pins, simulated bounce patterns)
//! - LED outputs (GPIO pins)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod led;
pub mod sampler;

pub use led::PinLed;
pub use sampler::{PatternSampler, PinSampler, Profile};
