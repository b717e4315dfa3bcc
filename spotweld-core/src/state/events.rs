//! Events that trigger status transitions

use super::machine::ErrorKind;

/// Events that can trigger status transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Post-boot settle delay elapsed, relay configured
    BootComplete,
    /// Operator fire command
    Arm,
    /// Current firing phase finished, including its settle delay
    PhaseComplete,
    /// Mandatory cool-down elapsed
    CooldownElapsed,
    /// Fatal inconsistency detected
    Fault(ErrorKind),
}
