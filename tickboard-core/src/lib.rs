//! Board-agnostic core logic for the Tickboard board-support layer
//!
//! This crate contains all logic that does not depend on a specific board:
//!
//! - Event model, bounded event queue and software alarms
//! - Heartbeat dispatcher that turns a 1 ms tick into alarm events
//! - Generic table-driven state-machine engine (one instance per channel)
//! - Button debounce and stuck-input detection built on that engine
//! - Board composition (LED bank, init lifecycle)
//! - Configuration types and a small TOML-subset parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod log;

pub mod alarm;
pub mod board;
pub mod button;
pub mod config;
pub mod dispatch;
pub mod event;
pub mod sme;
pub mod time;
pub mod traits;
