//! Per-activation phase of a state

/// Where a channel is within its current state
///
/// The phases run in declaration order. A finished state re-enters on its
/// next activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Never entered
    #[default]
    Uninitialized,
    /// Entry done, doing per-tick work
    Operational,
    /// Termination condition met, exit action pending
    Exit,
    /// Exit action done, next activation re-enters
    Finished,
}
