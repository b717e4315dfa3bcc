//! Build-time configuration
//!
//! Timings are fixed at compile time. Cargo features pick the encoder
//! decoding variants.

use spotweld_core::config::{ButtonTrigger, EncoderConfig, Resolution, WelderConfig};

/// Configuration this firmware was built with
pub const CONFIG: WelderConfig = WelderConfig {
    encoder: EncoderConfig {
        resolution: RESOLUTION,
        button: BUTTON,
        ..EncoderConfig::DEFAULT
    },
    ..WelderConfig::DEFAULT
};

#[cfg(feature = "encoder-full-quadrature")]
const RESOLUTION: Resolution = Resolution::Full;
#[cfg(not(feature = "encoder-full-quadrature"))]
const RESOLUTION: Resolution = Resolution::HalfStep;

#[cfg(feature = "button-level-trigger")]
const BUTTON: ButtonTrigger = ButtonTrigger::Level;
#[cfg(not(feature = "button-level-trigger"))]
const BUTTON: ButtonTrigger = ButtonTrigger::Edge;
