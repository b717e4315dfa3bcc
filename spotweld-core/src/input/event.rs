//! Shared operator event vocabulary

use crate::params::Parameter;

/// Operator intent, independent of the input device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiEvent {
    /// Encoder rotation: adjusts the selected value when editing,
    /// otherwise moves the selection
    Turn(i32),
    /// Select a parameter directly; leaves edit mode
    Select(Parameter),
    /// Adjust the selected value regardless of edit mode
    Adjust(i32),
    /// Enter or leave edit mode
    ToggleEdit,
    /// Request one firing sequence
    Arm,
}
