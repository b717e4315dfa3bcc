//! Welding sequencer
//!
//! Drives the relay through pre-impulse, pause and impulse, then a fixed
//! cool-down. Each phase commits its timing at the instant it begins:
//! the three derived timings are read in one critical section and the
//! phase's own entry is locked in for the whole phase.
//!
//! A started shot always runs to completion. There is no retry: a fault
//! latches `Error` and leaves the relay LOW, and no further shot starts.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;

use crate::config::SequencerConfig;
use crate::panel::Panel;
use crate::params::{Parameter, PARAMETER_COUNT};
use crate::state::{ErrorKind, Event, Status};

/// Sequencer faults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerError {
    /// Status was not `Booting` at start-up
    UnexpectedBootState(Status),
    /// Relay write failed
    RelayFault,
    /// Shot requested outside `Ready`; the relay was not touched
    NotReady(Status),
}

impl SequencerError {
    /// Status fault this error latches, if any
    fn kind(&self) -> Option<ErrorKind> {
        match self {
            SequencerError::UnexpectedBootState(_) => Some(ErrorKind::UnexpectedBootState),
            SequencerError::RelayFault => Some(ErrorKind::RelayFault),
            SequencerError::NotReady(_) => None,
        }
    }
}

/// Timings a completed shot actually used, per phase (ms)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShotReport {
    pub phase_ms: [u16; PARAMETER_COUNT],
}

/// Firing sequencer
pub struct Sequencer<'a, M: RawMutex, R, D> {
    panel: &'a Panel<M>,
    relay: R,
    delay: D,
    config: SequencerConfig,
}

impl<'a, M, R, D> Sequencer<'a, M, R, D>
where
    M: RawMutex,
    R: OutputPin,
    D: DelayNs,
{
    pub fn new(panel: &'a Panel<M>, relay: R, delay: D, config: SequencerConfig) -> Self {
        Self {
            panel,
            relay,
            delay,
            config,
        }
    }

    /// Current status
    pub fn status(&self) -> Status {
        self.panel.status()
    }

    /// Post-boot settle, relay configuration, then `Ready`
    pub async fn boot(&mut self) -> Result<(), SequencerError> {
        let status = self.panel.status();
        if status != Status::Booting {
            return Err(self.fail(SequencerError::UnexpectedBootState(status)));
        }

        self.delay.delay_ms(self.config.boot_settle_ms).await;
        self.relay_low()?;
        self.advance(Event::BootComplete);
        Ok(())
    }

    /// Wait for an accepted arm request
    pub async fn wait_armed(&mut self) {
        self.panel.wait_armed().await
    }

    /// Run one complete shot followed by the cool-down
    ///
    /// Ends in `Ready`. Arm requests received while firing or cooling
    /// are discarded. Refused without driving the relay unless the
    /// status is `Ready`; a latched `Error` stays latched.
    pub async fn fire(&mut self) -> Result<ShotReport, SequencerError> {
        let status = self.panel.status();
        if !status.accepts_arm() {
            return Err(SequencerError::NotReady(status));
        }

        let mut report = ShotReport {
            phase_ms: [0; PARAMETER_COUNT],
        };

        self.advance(Event::Arm);
        for phase in Parameter::ALL {
            // Commit point for this phase
            let hold_ms = self.panel.commit_timings().get(phase);
            report.phase_ms[phase.index()] = hold_ms;

            if phase.drives_relay() {
                self.relay_high()?;
                self.delay.delay_ms(hold_ms as u32).await;
                self.relay_low()?;
                self.delay.delay_ms(self.config.advance_ms).await;
            } else {
                self.delay
                    .delay_ms(hold_ms as u32 + self.config.advance_ms)
                    .await;
            }
            self.advance(Event::PhaseComplete);
        }

        self.delay.delay_ms(self.config.cooldown_ms).await;
        self.panel.clear_arm();
        self.advance(Event::CooldownElapsed);

        Ok(report)
    }

    fn advance(&mut self, event: Event) {
        let next = self.panel.status().transition(event);
        self.panel.publish(next);
    }

    fn relay_high(&mut self) -> Result<(), SequencerError> {
        if self.relay.set_high().is_err() {
            return Err(self.fail(SequencerError::RelayFault));
        }
        Ok(())
    }

    fn relay_low(&mut self) -> Result<(), SequencerError> {
        if self.relay.set_low().is_err() {
            return Err(self.fail(SequencerError::RelayFault));
        }
        Ok(())
    }

    /// Latch `Error` and leave the relay LOW (best effort)
    fn fail(&mut self, error: SequencerError) -> SequencerError {
        let _ = self.relay.set_low();
        if let Some(kind) = error.kind() {
            self.advance(Event::Fault(kind));
        }
        error
    }
}
