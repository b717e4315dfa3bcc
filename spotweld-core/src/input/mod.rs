//! Operator input decoding
//!
//! Both input paths translate raw signals into the same [`UiEvent`]
//! vocabulary, which [`crate::panel::Panel::dispatch`] applies. The
//! optional trigger input arms the panel directly.

pub mod command;
pub mod encoder;
pub mod event;
pub mod trigger;

pub use command::{decode_command, CommandReader};
pub use encoder::{EncoderOutput, EncoderSample, QuadratureDecoder};
pub use event::UiEvent;
pub use trigger::TriggerInput;
