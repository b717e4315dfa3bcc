//! Tunable weld parameters
//!
//! Three operator-facing durations and the relay-facing timings derived
//! from them. Every mutation recomputes all three derived timings.

use crate::config::{ADVANCE_MS, DEFAULT_VALUES, MAX_VALUE, MIN_VALUE};

/// Number of tunable parameters
pub const PARAMETER_COUNT: usize = 3;

/// One of the three tunable durations, in firing order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parameter {
    PreImpulse,
    Pause,
    Impulse,
}

impl Parameter {
    /// All parameters in firing order
    pub const ALL: [Parameter; PARAMETER_COUNT] =
        [Parameter::PreImpulse, Parameter::Pause, Parameter::Impulse];

    /// Position in the parameter list (0-2)
    pub const fn index(self) -> usize {
        match self {
            Parameter::PreImpulse => 0,
            Parameter::Pause => 1,
            Parameter::Impulse => 2,
        }
    }

    /// Look up a parameter by list position
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Parameter::PreImpulse),
            1 => Some(Parameter::Pause),
            2 => Some(Parameter::Impulse),
            _ => None,
        }
    }

    /// Move `delta` positions through the list, wrapping modulo 3
    pub fn wrapping_offset(self, delta: i32) -> Self {
        let index = (self.index() as i32 + delta).rem_euclid(PARAMETER_COUNT as i32);
        Parameter::ALL[index as usize]
    }

    /// Display name
    pub const fn name(self) -> &'static str {
        match self {
            Parameter::PreImpulse => "Pre-impulse",
            Parameter::Pause => "Pause",
            Parameter::Impulse => "Impulse",
        }
    }

    /// Whether the relay conducts during this firing phase
    pub const fn drives_relay(self) -> bool {
        !matches!(self, Parameter::Pause)
    }
}

/// Relay hold durations for one firing phase commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timings([u16; PARAMETER_COUNT]);

impl Timings {
    /// Derived timing for a parameter (ms)
    pub fn get(&self, parameter: Parameter) -> u16 {
        self.0[parameter.index()]
    }

    pub fn as_array(&self) -> [u16; PARAMETER_COUNT] {
        self.0
    }
}

/// Operator values plus derived relay timings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParameterStore {
    values: [u16; PARAMETER_COUNT],
    timings: Timings,
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterStore {
    /// Store holding the power-on defaults
    pub const fn new() -> Self {
        Self::with_values(DEFAULT_VALUES)
    }

    /// Store holding the given values, clamped into range
    pub const fn with_values(values: [u16; PARAMETER_COUNT]) -> Self {
        let values = [clamp(values[0]), clamp(values[1]), clamp(values[2])];
        Self {
            values,
            timings: derive_timings(&values),
        }
    }

    /// Add `delta` to a parameter, saturating at the limits
    ///
    /// Returns the new value. Derived timings for all three parameters
    /// are recomputed, even when the value did not move.
    pub fn adjust(&mut self, parameter: Parameter, delta: i32) -> u16 {
        let current = self.values[parameter.index()] as i32;
        let next = current
            .saturating_add(delta)
            .clamp(MIN_VALUE as i32, MAX_VALUE as i32);
        self.values[parameter.index()] = next as u16;
        self.recompute();
        next as u16
    }

    /// Recompute every derived timing from the current values
    pub fn recompute(&mut self) {
        self.timings = derive_timings(&self.values);
    }

    /// Operator-facing value (ms)
    pub fn value(&self, parameter: Parameter) -> u16 {
        self.values[parameter.index()]
    }

    /// All operator-facing values in firing order
    pub fn values(&self) -> [u16; PARAMETER_COUNT] {
        self.values
    }

    /// Relay-facing timings
    pub fn timings(&self) -> Timings {
        self.timings
    }
}

const fn clamp(value: u16) -> u16 {
    if value < MIN_VALUE {
        MIN_VALUE
    } else if value > MAX_VALUE {
        MAX_VALUE
    } else {
        value
    }
}

// MIN_VALUE > ADVANCE_MS, so this never underflows
const fn derive_timings(values: &[u16; PARAMETER_COUNT]) -> Timings {
    Timings([
        values[0] - ADVANCE_MS,
        values[1] - ADVANCE_MS,
        values[2] - ADVANCE_MS,
    ])
}
