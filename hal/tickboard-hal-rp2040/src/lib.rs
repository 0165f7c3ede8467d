//! RP2040-specific HAL for the Tickboard firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `tickboard-hal` traits:
//!
//! - Embassy GPIO inputs and outputs as `InputPin` / `OutputPin`
//! - Pin bank for config-driven pin assignment
//! - Up-front pin conflict checking

#![no_std]

pub mod gpio;
pub mod pins;

pub use gpio::{check_pins, PinError, RpInput, RpOutput, GPIO_COUNT};
pub use pins::PinBank;
