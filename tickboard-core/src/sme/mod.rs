//! Table-driven state-machine engine
//!
//! A state machine is described by a closed set of state tags, a handler
//! for those tags ([`StateSet`]), and a transition table. The engine keeps
//! one handler slot per channel, so N independent instances share one
//! behavior definition and one read-only table.
//!
//! Each activation of a channel runs exactly one phase of its current
//! state:
//!
//! ```text
//!  Uninitialized/Finished ──enter──► Operational ──operate: Leave──► Exit
//!                                      │    ▲                          │
//!                                      └────┘ operate: Stay            │
//!                                                                      ▼
//!                       table lookup (state, event, data, reason) ◄── exit
//! ```

pub mod engine;
pub mod phase;
pub mod table;

use core::fmt;

pub use engine::{Engine, ExitReport, Progress, StateSet, Step};
pub use phase::Phase;
pub use table::{find_transition, DataMatch, Transition, TransitionAction};

/// Bound for state tags and exit reasons
///
/// Tags are compared by value for table matching and show up in logs.
#[cfg(feature = "defmt")]
pub trait Tag: Copy + Eq + fmt::Debug + defmt::Format {}
#[cfg(feature = "defmt")]
impl<T: Copy + Eq + fmt::Debug + defmt::Format> Tag for T {}

/// Bound for state tags and exit reasons
///
/// Tags are compared by value for table matching and show up in logs.
#[cfg(not(feature = "defmt"))]
pub trait Tag: Copy + Eq + fmt::Debug {}
#[cfg(not(feature = "defmt"))]
impl<T: Copy + Eq + fmt::Debug> Tag for T {}
