//! Board-agnostic control logic for the spot welder firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Parameter store with derived relay timings
//! - UI focus state (selection, edit mode, blink clock)
//! - Sequencer status machine and the firing sequencer
//! - Rotary encoder and command channel decoders
//! - Shared state handle coordinating all of the above
//! - Configuration constants
//!
//! Hardware is reached only through `embedded-hal`, `embedded-hal-async`
//! and `embedded-io-async` traits, so everything here runs in host tests.

#![no_std]
#![deny(unsafe_code)]

// proptest assertions format their messages with `format!`
#[cfg(test)]
#[macro_use]
extern crate std;

pub mod config;
pub mod focus;
pub mod input;
pub mod panel;
pub mod params;
pub mod sequencer;
pub mod state;

pub use panel::{Outcome, Panel, PanelView};
pub use params::{Parameter, ParameterStore, Timings};
pub use sequencer::{Sequencer, SequencerError, ShotReport};
pub use state::{ErrorKind, Status};
