//! Status display task
//!
//! Redraws the status screen every refresh period and drives the edit
//! cursor blink. Frames identical to the last one sent are skipped.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Async, Spi};
use embassy_time::{Delay, Duration, Instant, Ticker};
use spotweld_core::config::DisplayConfig;
use spotweld_core::focus::BlinkClock;
use spotweld_display::{compose, draw, Screen};

use crate::sh1106::Sh1106;
use crate::shared::PANEL;

/// OLED on SPI0 with DC, CS and RST outputs
pub type Oled = Sh1106<Spi<'static, SPI0, Async>, Output<'static>, Output<'static>, Output<'static>>;

#[embassy_executor::task]
pub async fn display_task(mut oled: Oled, config: DisplayConfig) {
    info!("Display task started");

    if let Err(e) = oled.init(&mut Delay).await {
        error!("Failed to initialize display: {:?}", e);
        return;
    }
    info!("OLED initialized");

    let mut blink = BlinkClock::new(config.blink_ms);
    let mut ticker = Ticker::every(Duration::from_millis(config.refresh_ms as u64));
    let mut shown: Option<Screen> = None;

    loop {
        PANEL.set_blink(blink.update(Instant::now().as_millis()));

        let screen = compose(&PANEL.view());
        if shown.as_ref() != Some(&screen) {
            let Ok(()) = draw(&screen, &mut oled);
            match oled.flush().await {
                Ok(()) => shown = Some(screen),
                Err(e) => warn!("Display flush failed: {:?}", e),
            }
        }

        ticker.next().await;
    }
}
