//! Hardware abstraction traits
//!
//! These traits define the interface between the board logic and the
//! drivers that feed it samples and light its LEDs.

pub mod input;
pub mod led;

pub use input::SampleSource;
pub use led::LedOutput;
