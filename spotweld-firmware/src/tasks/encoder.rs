//! Rotary encoder task
//!
//! Samples the encoder pins every poll period and feeds the decoded
//! events to the panel.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Ticker};
use spotweld_core::config::EncoderConfig;
use spotweld_core::input::{EncoderSample, QuadratureDecoder};

use super::report;
use crate::shared::PANEL;

#[embassy_executor::task]
pub async fn encoder_task(
    mut a: Input<'static>,
    mut b: Input<'static>,
    mut button: Input<'static>,
    config: EncoderConfig,
) {
    info!(
        "Encoder task started ({:?}, {:?})",
        config.resolution, config.button
    );

    let Ok(initial) = EncoderSample::read(&mut a, &mut b, &mut button);
    let mut decoder = QuadratureDecoder::new(config, initial);
    let mut ticker = Ticker::every(Duration::from_millis(config.poll_ms as u64));

    loop {
        ticker.next().await;

        let Ok(sample) = EncoderSample::read(&mut a, &mut b, &mut button);
        let output = decoder.update(sample);
        if output.is_empty() {
            continue;
        }

        trace!("Encoder: {:?}", output);
        for event in output.events() {
            if let Some(outcome) = PANEL.dispatch(event) {
                report("encoder", outcome);
            }
        }
    }
}
