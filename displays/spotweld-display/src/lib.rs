//! Status display for the spot welder
//!
//! This crate provides:
//! - `Screen`, a character buffer with per-row inverted regions
//! - `compose`, which lays out the welder status on a `Screen`
//! - `draw`, which paints a `Screen` on any binary-colour
//!   `embedded-graphics` draw target
//!
//! # Layout
//!
//! ```text
//! SPOT WELDER READY
//!
//!  Pre-impulse: 30      <- selected row, inverted
//!  Pause: 10
//!  Impulse: 130
//! ```
//!
//! While editing, the selected value blinks: on the blink phase the value
//! field is inverted a second time, which shows it un-highlighted.

#![no_std]

pub mod layout;
pub mod render;
pub mod screen;

// Re-export key types
pub use layout::compose;
pub use render::draw;
pub use screen::{Screen, Span, SCREEN_COLS, SCREEN_ROWS};
