//! Button sample sources

pub mod pattern;
pub mod pin;

pub use pattern::{PatternSampler, Profile, MAX_PENDING_BITS};
pub use pin::PinSampler;
