//! Rotary encoder decoder
//!
//! Turns polled quadrature and push-button levels into [`UiEvent`]s.
//! The decoder keeps only the previous sample; every detected change
//! yields a single-step delta, never an accumulated dial position.

use embedded_hal::digital::InputPin;

use super::event::UiEvent;
use crate::config::{ButtonTrigger, EncoderConfig, Resolution};

/// Full-resolution transition table, indexed by `prev << 2 | curr`
/// where a state is `A << 1 | B`.
///
/// +1: 00 -> 10 -> 11 -> 01 -> 00. Reverse order is -1. Double
/// transitions (both lines changed) are invalid and count 0.
const QUADRATURE_TABLE: [i8; 16] = [
    0, -1, 1, 0, //
    1, 0, 0, -1, //
    -1, 0, 0, 1, //
    0, 1, -1, 0, //
];

/// Logic levels of the encoder lines at one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderSample {
    pub a: bool,
    pub b: bool,
    pub button: bool,
}

impl EncoderSample {
    pub const fn new(a: bool, b: bool, button: bool) -> Self {
        Self { a, b, button }
    }

    /// Read all three lines
    pub fn read<P: InputPin>(a: &mut P, b: &mut P, button: &mut P) -> Result<Self, P::Error> {
        Ok(Self {
            a: a.is_high()?,
            b: b.is_high()?,
            button: button.is_high()?,
        })
    }

    fn bits(&self) -> usize {
        ((self.a as usize) << 1) | self.b as usize
    }
}

/// Events produced by one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderOutput {
    pub toggle: Option<UiEvent>,
    pub turn: Option<UiEvent>,
}

impl EncoderOutput {
    /// Events in application order: button first, then rotation
    pub fn events(self) -> impl Iterator<Item = UiEvent> {
        [self.toggle, self.turn].into_iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.toggle.is_none() && self.turn.is_none()
    }
}

/// Quadrature encoder decoder
#[derive(Debug, Clone)]
pub struct QuadratureDecoder {
    config: EncoderConfig,
    last: EncoderSample,
}

impl QuadratureDecoder {
    /// Create a decoder primed with the current line levels
    pub fn new(config: EncoderConfig, initial: EncoderSample) -> Self {
        Self {
            config,
            last: initial,
        }
    }

    /// Process one poll
    pub fn update(&mut self, sample: EncoderSample) -> EncoderOutput {
        let pressed = match self.config.button {
            ButtonTrigger::Edge => sample.button && !self.last.button,
            ButtonTrigger::Level => sample.button,
        };

        let delta = if sample.a != self.last.a || sample.b != self.last.b {
            self.decode(sample)
        } else {
            0
        };

        self.last = sample;

        EncoderOutput {
            toggle: pressed.then_some(UiEvent::ToggleEdit),
            turn: (delta != 0).then_some(UiEvent::Turn(delta)),
        }
    }

    /// Signed step for a change on A or B
    fn decode(&self, sample: EncoderSample) -> i32 {
        match self.config.resolution {
            // Only the two mixed levels are actionable; A=B edges are
            // observed but dropped
            Resolution::HalfStep => match (sample.a, sample.b) {
                (false, true) => -1,
                (true, false) => 1,
                _ => 0,
            },
            Resolution::Full => {
                QUADRATURE_TABLE[(self.last.bits() << 2) | sample.bits()] as i32
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoder(resolution: Resolution, button: ButtonTrigger) -> QuadratureDecoder {
        QuadratureDecoder::new(
            EncoderConfig {
                resolution,
                button,
                poll_ms: 1,
            },
            EncoderSample::default(),
        )
    }

    fn turns(decoder: &mut QuadratureDecoder, levels: &[(bool, bool)]) -> i32 {
        levels
            .iter()
            .filter_map(|&(a, b)| decoder.update(EncoderSample::new(a, b, false)).turn)
            .map(|event| match event {
                UiEvent::Turn(delta) => delta,
                _ => 0,
            })
            .sum()
    }

    #[test]
    fn test_half_step_counts_mixed_levels() {
        let mut dec = decoder(Resolution::HalfStep, ButtonTrigger::Edge);
        // 00 -> 10 -> 11 -> 01 -> 00: one +1 at 10, one -1 at 01
        assert_eq!(
            dec.update(EncoderSample::new(true, false, false)).turn,
            Some(UiEvent::Turn(1))
        );
        assert_eq!(dec.update(EncoderSample::new(true, true, false)).turn, None);
        assert_eq!(
            dec.update(EncoderSample::new(false, true, false)).turn,
            Some(UiEvent::Turn(-1))
        );
        assert_eq!(dec.update(EncoderSample::new(false, false, false)).turn, None);
    }

    #[test]
    fn test_half_step_needs_change() {
        let mut dec = decoder(Resolution::HalfStep, ButtonTrigger::Edge);
        assert!(dec.update(EncoderSample::new(true, false, false)).turn.is_some());
        // Holding the same levels produces nothing
        assert!(dec.update(EncoderSample::new(true, false, false)).is_empty());
    }

    #[test]
    fn test_full_resolution_forward_and_back() {
        let mut dec = decoder(Resolution::Full, ButtonTrigger::Edge);
        let forward = [(true, false), (true, true), (false, true), (false, false)];
        assert_eq!(turns(&mut dec, &forward), 4);

        let backward = [(false, true), (true, true), (true, false), (false, false)];
        assert_eq!(turns(&mut dec, &backward), -4);
    }

    #[test]
    fn test_full_resolution_ignores_double_transition() {
        let mut dec = decoder(Resolution::Full, ButtonTrigger::Edge);
        assert_eq!(turns(&mut dec, &[(true, true)]), 0);
    }

    #[test]
    fn test_edge_button_toggles_once_per_press() {
        let mut dec = decoder(Resolution::HalfStep, ButtonTrigger::Edge);
        let held = EncoderSample::new(false, false, true);
        assert_eq!(dec.update(held).toggle, Some(UiEvent::ToggleEdit));
        assert_eq!(dec.update(held).toggle, None);
        assert_eq!(dec.update(held).toggle, None);
        assert_eq!(dec.update(EncoderSample::default()).toggle, None);
        assert_eq!(dec.update(held).toggle, Some(UiEvent::ToggleEdit));
    }

    #[test]
    fn test_level_button_repeats_while_held() {
        let mut dec = decoder(Resolution::HalfStep, ButtonTrigger::Level);
        let held = EncoderSample::new(false, false, true);
        for _ in 0..3 {
            assert_eq!(dec.update(held).toggle, Some(UiEvent::ToggleEdit));
        }
    }

    #[test]
    fn test_button_precedes_turn() {
        let mut dec = decoder(Resolution::HalfStep, ButtonTrigger::Edge);
        let output = dec.update(EncoderSample::new(true, false, true));
        let mut events = output.events();
        assert_eq!(events.next(), Some(UiEvent::ToggleEdit));
        assert_eq!(events.next(), Some(UiEvent::Turn(1)));
        assert_eq!(events.next(), None);
    }
}
