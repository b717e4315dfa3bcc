//! Welding sequencer task
//!
//! Highest-priority task. Owns the relay output and wakes only for timer
//! expiries and arm requests, so phase timing is not delayed by input or
//! display work. Boots once, then fires one shot per accepted arm; any
//! fault ends the task with the status latched to `Error`.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::Delay;
use spotweld_core::config::SequencerConfig;
use spotweld_core::Sequencer;

use crate::shared::PANEL;

#[embassy_executor::task]
pub async fn sequencer_task(relay: Output<'static>, config: SequencerConfig) {
    info!("Sequencer task started");

    let mut sequencer = Sequencer::new(&PANEL, relay, Delay, config);

    if let Err(e) = sequencer.boot().await {
        error!("Boot failed: {:?}", e);
        return;
    }
    info!("Welder ready");

    let mut shots: u32 = 0;
    loop {
        sequencer.wait_armed().await;
        debug!("Arm received, firing");

        match sequencer.fire().await {
            Ok(report) => {
                shots = shots.wrapping_add(1);
                info!("Shot {} complete: {:?}", shots, report);
            }
            Err(e) => {
                error!("Sequencer halted: {:?}, status {:?}", e, sequencer.status());
                return;
            }
        }
    }
}
