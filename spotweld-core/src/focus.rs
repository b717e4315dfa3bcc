//! UI focus state
//!
//! Which parameter the operator is looking at, whether turning the
//! encoder edits it, and the cursor blink phase.

use crate::params::Parameter;

/// Selected field and edit mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UiFocus {
    selected: Parameter,
    editing: bool,
}

impl Default for UiFocus {
    fn default() -> Self {
        Self::new()
    }
}

impl UiFocus {
    pub const fn new() -> Self {
        Self {
            selected: Parameter::PreImpulse,
            editing: false,
        }
    }

    pub fn selected(&self) -> Parameter {
        self.selected
    }

    pub fn editing(&self) -> bool {
        self.editing
    }

    /// Select a parameter directly and leave edit mode
    pub fn select(&mut self, parameter: Parameter) {
        self.selected = parameter;
        self.editing = false;
    }

    /// Move the selection by `delta` entries, wrapping
    pub fn navigate(&mut self, delta: i32) -> Parameter {
        self.selected = self.selected.wrapping_offset(delta);
        self.selected
    }

    /// Flip edit mode, returning the new mode
    pub fn toggle_editing(&mut self) -> bool {
        self.editing = !self.editing;
        self.editing
    }
}

/// Blink phase derived from a monotonic millisecond clock
///
/// The phase flips each time `period_ms` has elapsed since the last flip.
#[derive(Debug, Clone, Copy)]
pub struct BlinkClock {
    period_ms: u64,
    last_toggle_ms: u64,
    phase: bool,
}

impl BlinkClock {
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms as u64,
            last_toggle_ms: 0,
            phase: false,
        }
    }

    /// Advance to `now_ms` and return the current phase
    pub fn update(&mut self, now_ms: u64) -> bool {
        if self.period_ms > 0 && now_ms.saturating_sub(self.last_toggle_ms) >= self.period_ms {
            self.phase = !self.phase;
            self.last_toggle_ms = now_ms;
        }
        self.phase
    }

    pub fn phase(&self) -> bool {
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_leaves_edit_mode() {
        let mut focus = UiFocus::new();
        focus.toggle_editing();
        assert!(focus.editing());

        focus.select(Parameter::Impulse);
        assert_eq!(focus.selected(), Parameter::Impulse);
        assert!(!focus.editing());
    }

    #[test]
    fn test_navigate_wraps() {
        let mut focus = UiFocus::new();
        assert_eq!(focus.navigate(-1), Parameter::Impulse);
        assert_eq!(focus.navigate(2), Parameter::Pause);
        assert_eq!(focus.navigate(4), Parameter::Impulse);
    }

    #[test]
    fn test_navigate_keeps_edit_mode() {
        let mut focus = UiFocus::new();
        focus.toggle_editing();
        focus.navigate(1);
        assert!(focus.editing());
    }

    #[test]
    fn test_blink_clock() {
        let mut blink = BlinkClock::new(750);
        assert!(!blink.update(0));
        assert!(!blink.update(749));
        assert!(blink.update(750));
        assert!(blink.update(1499));
        assert!(!blink.update(1500));
    }

    #[test]
    fn test_blink_clock_late_update() {
        let mut blink = BlinkClock::new(750);
        // A stalled renderer flips once, not once per missed period
        assert!(blink.update(5000));
        assert!(blink.update(5700));
        assert!(!blink.update(5750));
    }
}
