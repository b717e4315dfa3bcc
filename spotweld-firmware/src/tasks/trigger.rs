//! Foot switch task

use defmt::*;
use embassy_rp::gpio::Input;
use spotweld_core::input::TriggerInput;

use super::report;
use crate::shared::PANEL;

#[embassy_executor::task]
pub async fn trigger_task(pin: Input<'static>) {
    info!("Trigger task started");

    let mut trigger = TriggerInput::new(pin);

    loop {
        match trigger.next(&PANEL).await {
            Ok(outcome) => report("trigger", outcome),
            Err(e) => match e {},
        }
    }
}
