//! Shared welder state
//!
//! One statically allocated handle owns the parameter store, the UI focus
//! and the sequencer status. Tasks on different executors reach it through
//! a shared reference:
//!
//! - parameters and focus sit behind a blocking mutex; each mutation is one
//!   short critical section, and the sequencer reads all three derived
//!   timings in a single lock
//! - status and blink phase are atomics, read without locking
//! - the arm request is a [`Signal`], which holds at most one pending arm

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicBool, AtomicU8, Ordering};

use crate::focus::UiFocus;
use crate::input::UiEvent;
use crate::params::{Parameter, ParameterStore, Timings, PARAMETER_COUNT};
use crate::state::Status;

/// Result of applying one [`UiEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Selection moved
    Selected(Parameter),
    /// A value changed (or was clamped in place)
    Adjusted { parameter: Parameter, value: u16 },
    /// Edit mode flipped
    Editing(bool),
    /// Arm accepted
    Armed,
    /// Arm dropped because the sequencer was not `Ready`
    ArmIgnored(Status),
}

/// Copy of everything the status display needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelView {
    pub status: Status,
    pub values: [u16; PARAMETER_COUNT],
    pub selected: Parameter,
    pub editing: bool,
    pub blink: bool,
}

struct Inner {
    params: ParameterStore,
    focus: UiFocus,
}

/// Shared state handle
pub struct Panel<M: RawMutex> {
    inner: Mutex<M, RefCell<Inner>>,
    status: AtomicU8,
    blink: AtomicBool,
    arm: Signal<M, ()>,
}

impl<M: RawMutex> Default for Panel<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> Panel<M> {
    /// Panel with default values, status `Booting`
    pub const fn new() -> Self {
        Self::with_params(ParameterStore::new())
    }

    pub const fn with_params(params: ParameterStore) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Inner {
                params,
                focus: UiFocus::new(),
            })),
            status: AtomicU8::new(Status::Booting.to_bits()),
            blink: AtomicBool::new(false),
            arm: Signal::new(),
        }
    }

    /// Apply an operator event
    pub fn dispatch(&self, event: UiEvent) -> Option<Outcome> {
        match event {
            UiEvent::Turn(0) | UiEvent::Adjust(0) => None,
            UiEvent::Turn(delta) => Some(self.with_inner(|inner| {
                if inner.focus.editing() {
                    let parameter = inner.focus.selected();
                    let value = inner.params.adjust(parameter, delta);
                    Outcome::Adjusted { parameter, value }
                } else {
                    Outcome::Selected(inner.focus.navigate(delta))
                }
            })),
            UiEvent::Select(parameter) => Some(self.with_inner(|inner| {
                inner.focus.select(parameter);
                Outcome::Selected(parameter)
            })),
            UiEvent::Adjust(delta) => Some(self.with_inner(|inner| {
                let parameter = inner.focus.selected();
                let value = inner.params.adjust(parameter, delta);
                Outcome::Adjusted { parameter, value }
            })),
            UiEvent::ToggleEdit => {
                Some(self.with_inner(|inner| Outcome::Editing(inner.focus.toggle_editing())))
            }
            UiEvent::Arm => Some(self.arm()),
        }
    }

    /// Request one firing sequence
    ///
    /// Only accepted while `Ready`. Repeated arms before the sequencer
    /// wakes collapse into one shot.
    pub fn arm(&self) -> Outcome {
        let status = self.status();
        if status.accepts_arm() {
            self.arm.signal(());
            Outcome::Armed
        } else {
            Outcome::ArmIgnored(status)
        }
    }

    /// Add `delta` to one parameter
    pub fn adjust(&self, parameter: Parameter, delta: i32) -> u16 {
        self.with_inner(|inner| inner.params.adjust(parameter, delta))
    }

    /// Atomic snapshot of all three derived timings
    pub fn commit_timings(&self) -> Timings {
        self.with_inner(|inner| inner.params.timings())
    }

    pub fn params(&self) -> ParameterStore {
        self.with_inner(|inner| inner.params)
    }

    pub fn focus(&self) -> UiFocus {
        self.with_inner(|inner| inner.focus)
    }

    /// Current sequencer status
    pub fn status(&self) -> Status {
        Status::from_bits(self.status.load(Ordering::Acquire))
    }

    pub fn set_blink(&self, phase: bool) {
        self.blink.store(phase, Ordering::Relaxed);
    }

    /// Snapshot for the status display
    pub fn view(&self) -> PanelView {
        let (values, focus) = self.with_inner(|inner| (inner.params.values(), inner.focus));
        PanelView {
            status: self.status(),
            values,
            selected: focus.selected(),
            editing: focus.editing(),
            blink: self.blink.load(Ordering::Relaxed),
        }
    }

    /// Publish a new status. Only the sequencer writes the status.
    pub(crate) fn publish(&self, status: Status) {
        self.status.store(status.to_bits(), Ordering::Release);
    }

    /// Wait for an arm request
    pub(crate) async fn wait_armed(&self) {
        self.arm.wait().await
    }

    /// Drop any arm request received while busy
    pub(crate) fn clear_arm(&self) {
        self.arm.reset();
    }

    fn with_inner<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::decode_command;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    fn ready_panel() -> Panel<NoopRawMutex> {
        let panel = Panel::new();
        panel.publish(Status::Ready);
        panel
    }

    fn feed(panel: &Panel<NoopRawMutex>, bytes: &[u8]) {
        for &byte in bytes {
            if let Some(event) = decode_command(byte) {
                panel.dispatch(event);
            }
        }
    }

    #[test]
    fn test_command_sequence_adjusts_selected() {
        let panel = ready_panel();
        feed(&panel, b"2iii");

        let view = panel.view();
        assert_eq!(view.selected, Parameter::Pause);
        assert_eq!(view.values, [30, 40, 130]);
        assert_eq!(panel.commit_timings().as_array(), [25, 35, 125]);
    }

    #[test]
    fn test_command_select_leaves_edit_mode() {
        let panel = ready_panel();
        feed(&panel, b"e");
        assert!(panel.focus().editing());
        feed(&panel, b"3");
        assert!(!panel.focus().editing());
        assert_eq!(panel.focus().selected(), Parameter::Impulse);
    }

    #[test]
    fn test_command_adjust_ignores_edit_mode() {
        let panel = ready_panel();
        feed(&panel, b"1dddd");
        assert_eq!(panel.params().value(Parameter::PreImpulse), 10);
    }

    #[test]
    fn test_turn_navigates_when_not_editing() {
        let panel = ready_panel();
        for delta in [1, 1, 1, 1] {
            panel.dispatch(UiEvent::Turn(delta));
        }
        assert_eq!(panel.focus().selected(), Parameter::Pause);
        assert_eq!(panel.params(), ParameterStore::new());
    }

    #[test]
    fn test_turn_adjusts_when_editing() {
        let panel = ready_panel();
        panel.dispatch(UiEvent::Select(Parameter::Impulse));
        panel.dispatch(UiEvent::ToggleEdit);

        let outcome = panel.dispatch(UiEvent::Turn(-1));
        assert_eq!(
            outcome,
            Some(Outcome::Adjusted {
                parameter: Parameter::Impulse,
                value: 129
            })
        );
        assert_eq!(panel.focus().selected(), Parameter::Impulse);
    }

    #[test]
    fn test_zero_delta_is_noop() {
        let panel = ready_panel();
        assert_eq!(panel.dispatch(UiEvent::Turn(0)), None);
        assert_eq!(panel.dispatch(UiEvent::Adjust(0)), None);
        assert_eq!(panel.focus().selected(), Parameter::PreImpulse);
    }

    #[test]
    fn test_arm_only_when_ready() {
        let panel: Panel<NoopRawMutex> = Panel::new();
        assert_eq!(panel.arm(), Outcome::ArmIgnored(Status::Booting));

        panel.publish(Status::Cooling);
        assert_eq!(panel.dispatch(UiEvent::Arm), Some(Outcome::ArmIgnored(Status::Cooling)));

        panel.publish(Status::Ready);
        assert_eq!(panel.dispatch(UiEvent::Arm), Some(Outcome::Armed));
    }

    #[test]
    fn test_view_reflects_blink_and_status() {
        let panel = ready_panel();
        panel.set_blink(true);
        panel.dispatch(UiEvent::ToggleEdit);

        let view = panel.view();
        assert_eq!(view.status, Status::Ready);
        assert!(view.blink);
        assert!(view.editing);
        assert_eq!(view.values, [30, 10, 130]);
    }
}
