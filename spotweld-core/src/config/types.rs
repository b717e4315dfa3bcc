//! Configuration type definitions

/// Lower bound of every operator-facing duration (ms)
pub const MIN_VALUE: u16 = 10;

/// Upper bound of every operator-facing duration (ms)
pub const MAX_VALUE: u16 = 400;

/// Relay switching-latency compensation (ms), not operator-tunable
pub const ADVANCE_MS: u16 = 5;

/// Step applied by the `i` / `d` commands (ms)
pub const COMMAND_STEP: i32 = 10;

/// Power-on values for pre-impulse, pause and impulse (ms)
pub const DEFAULT_VALUES: [u16; 3] = [30, 10, 130];

/// How many quadrature edges produce a count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// Only the (A=HIGH, B=LOW) and (A=LOW, B=HIGH) levels count.
    /// Two of four edges per cycle register.
    #[default]
    HalfStep,
    /// Gray-code transition table, every valid edge counts
    Full,
}

/// When the encoder push-button toggles edit mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonTrigger {
    /// Toggle once per LOW -> HIGH transition
    #[default]
    Edge,
    /// Toggle on every poll that reads HIGH (repeats while held)
    Level,
}

/// Quadrature decoder options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderConfig {
    pub resolution: Resolution,
    pub button: ButtonTrigger,
    /// Poll period in milliseconds
    pub poll_ms: u32,
}

impl EncoderConfig {
    pub const DEFAULT: Self = Self {
        resolution: Resolution::HalfStep,
        button: ButtonTrigger::Edge,
        poll_ms: 1,
    };
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Fixed durations of the firing sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequencerConfig {
    /// Settle delay between power-on and `Ready` (ms)
    pub boot_settle_ms: u32,
    /// Mandatory pause after a shot before re-arming (ms)
    pub cooldown_ms: u32,
    /// Settle delay after every firing phase (ms)
    pub advance_ms: u32,
}

impl SequencerConfig {
    pub const DEFAULT: Self = Self {
        boot_settle_ms: 1_000,
        cooldown_ms: 5_000,
        advance_ms: ADVANCE_MS as u32,
    };
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Status display timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Frame period (ms), ~25 refreshes per second
    pub refresh_ms: u32,
    /// Edit cursor blink half-period (ms)
    pub blink_ms: u32,
}

impl DisplayConfig {
    pub const DEFAULT: Self = Self {
        refresh_ms: 40,
        blink_ms: 750,
    };
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Complete welder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WelderConfig {
    pub sequencer: SequencerConfig,
    pub encoder: EncoderConfig,
    pub display: DisplayConfig,
}

impl WelderConfig {
    pub const DEFAULT: Self = Self {
        sequencer: SequencerConfig::DEFAULT,
        encoder: EncoderConfig::DEFAULT,
        display: DisplayConfig::DEFAULT,
    };
}

impl Default for WelderConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
