//! Configuration types
//!
//! The welder has no configuration file and persists nothing. Every
//! tunable constant is fixed at compile time in [`WelderConfig::DEFAULT`];
//! decoder behaviour is selected through firmware cargo features.

pub mod types;

pub use types::*;
