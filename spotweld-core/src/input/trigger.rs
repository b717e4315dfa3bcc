//! Hardware fire trigger
//!
//! A foot switch or push button that reads HIGH when pressed. Each
//! LOW→HIGH edge requests one shot, with the same `Ready` gate as the
//! `'!'` command.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::digital::Wait;

use crate::panel::{Outcome, Panel};

/// Edge-triggered arm input
pub struct TriggerInput<P> {
    pin: P,
}

impl<P: Wait> TriggerInput<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Wait for the next press and request a shot
    pub async fn next<M: RawMutex>(&mut self, panel: &Panel<M>) -> Result<Outcome, P::Error> {
        self.pin.wait_for_rising_edge().await?;
        Ok(panel.arm())
    }
}
