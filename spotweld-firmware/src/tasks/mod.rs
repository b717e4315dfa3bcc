//! Embassy async tasks
//!
//! The sequencer and the renderer each run on their own interrupt
//! executor. Input tasks share the thread-mode executor.

pub mod command;
pub mod display;
pub mod encoder;
pub mod sequencer;
#[cfg(feature = "trigger-pin")]
pub mod trigger;

pub use command::command_task;
pub use display::{display_task, Oled};
pub use encoder::encoder_task;
pub use sequencer::sequencer_task;
#[cfg(feature = "trigger-pin")]
pub use trigger::trigger_task;

use defmt::*;
use spotweld_core::Outcome;

/// Log the effect of an operator event
fn report(source: &str, outcome: Outcome) {
    match outcome {
        Outcome::Armed => info!("{}: arm accepted", source),
        Outcome::ArmIgnored(status) => warn!("{}: arm ignored while {:?}", source, status),
        Outcome::Adjusted { parameter, value } => {
            debug!("{}: {:?} = {}", source, parameter, value)
        }
        other => debug!("{}: {:?}", source, other),
    }
}
