//! Serial command task
//!
//! Reads the single-byte command channel. Only the first byte of each
//! received burst is acted on.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embassy_time::{Duration, Timer};
use spotweld_core::input::CommandReader;

use super::report;
use crate::shared::PANEL;

#[embassy_executor::task]
pub async fn command_task(rx: BufferedUartRx) {
    info!("Command task started");

    let mut reader = CommandReader::new(rx);

    loop {
        match reader.next().await {
            Ok(Some((byte, Some(event)))) => {
                debug!("Command {=u8:#x}: {:?}", byte, event);
                if let Some(outcome) = PANEL.dispatch(event) {
                    report("command", outcome);
                }
            }
            Ok(Some((byte, None))) => {
                trace!("Ignoring byte {=u8:#x}", byte);
            }
            Ok(None) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
                Timer::after(Duration::from_millis(10)).await;
            }
        }
    }
}
