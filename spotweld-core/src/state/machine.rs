//! Status machine definition
//!
//! Relay behavior is a function of the current status. Only the
//! sequencer advances the status; everything else reads it.

use super::events::Event;
use crate::params::Parameter;

/// Sequencer status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// Power-on settle, relay not yet configured
    Booting,
    /// Waiting for an arm signal
    Ready,
    /// Executing one phase of a shot
    Firing(Parameter),
    /// Mandatory pause after a shot; arm signals are dropped
    Cooling,
    /// Fault detected; relay held LOW, no further transitions
    Error(ErrorKind),
}

/// Types of fatal faults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// Status was not `Booting` when the sequencer started
    UnexpectedBootState,
    /// Relay output could not be driven
    RelayFault,
}

impl Status {
    /// Check if the relay may conduct in this status
    pub fn relay_allowed(&self) -> bool {
        matches!(self, Status::Firing(phase) if phase.drives_relay())
    }

    /// Check if an arm signal would start a shot
    pub fn accepts_arm(&self) -> bool {
        matches!(self, Status::Ready)
    }

    /// Short label for the status header (fits the 21-column display)
    pub fn label(&self) -> &'static str {
        match self {
            Status::Booting => "BOOTING",
            Status::Ready => "READY",
            Status::Firing(Parameter::PreImpulse) => "ZAPP PRE",
            Status::Firing(Parameter::Pause) => "ZAPP PAU",
            Status::Firing(Parameter::Impulse) => "ZAPP IMP",
            Status::Cooling => "COOLING",
            Status::Error(_) => "ERROR",
        }
    }

    /// Process an event and return the next status
    ///
    /// This is the core transition logic. `Error` is latched: once
    /// entered, no event leaves it.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Parameter::*;
        use Status::*;

        match (self, event) {
            (Error(_), _) => self,
            (_, Fault(kind)) => Error(kind),

            (Booting, BootComplete) => Ready,

            (Ready, Arm) => Firing(PreImpulse),

            (Firing(PreImpulse), PhaseComplete) => Firing(Pause),
            (Firing(Pause), PhaseComplete) => Firing(Impulse),
            (Firing(Impulse), PhaseComplete) => Cooling,

            (Cooling, CooldownElapsed) => Ready,

            // Arm while busy, duplicate boot, etc.: stay in current status
            _ => self,
        }
    }

    /// Encode for lock-free publication
    pub(crate) const fn to_bits(self) -> u8 {
        match self {
            Status::Booting => 0,
            Status::Ready => 1,
            Status::Firing(Parameter::PreImpulse) => 2,
            Status::Firing(Parameter::Pause) => 3,
            Status::Firing(Parameter::Impulse) => 4,
            Status::Cooling => 5,
            Status::Error(ErrorKind::UnexpectedBootState) => 6,
            Status::Error(ErrorKind::RelayFault) => 7,
        }
    }

    /// Decode a published status
    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits {
            0 => Status::Booting,
            1 => Status::Ready,
            2 => Status::Firing(Parameter::PreImpulse),
            3 => Status::Firing(Parameter::Pause),
            4 => Status::Firing(Parameter::Impulse),
            5 => Status::Cooling,
            6 => Status::Error(ErrorKind::UnexpectedBootState),
            _ => Status::Error(ErrorKind::RelayFault),
        }
    }
}
