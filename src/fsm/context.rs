//! Shared mutable context threaded through every FSM handler.
//!
//! `FocusContext` is the single struct that state handlers read from and
//! write to: this tick's button inputs, the elapsed time, both state
//! timers, the display string, and the timing configuration.  It is plain
//! data, so a test can build any starting point directly.

use crate::config::FocusConfig;

// ---------------------------------------------------------------------------
// Inputs (written by the machine from decoder output before each tick)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonInputs {
    /// True while the button is held.
    pub level: bool,
    /// True on the single tick the button went down.
    pub rising_edge: bool,
}

// ---------------------------------------------------------------------------
// Timing configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusTiming {
    /// Continuous hold needed in `Off` to enable.
    pub hold_to_enable_secs: f32,
    /// How long `ConfirmDisable` waits for the second press.
    pub confirm_disable_window_secs: f32,
}

impl Default for FocusTiming {
    fn default() -> Self {
        Self::from(&FocusConfig::default())
    }
}

impl From<&FocusConfig> for FocusTiming {
    fn from(config: &FocusConfig) -> Self {
        Self {
            hold_to_enable_secs: config.hold_to_enable_secs,
            confirm_disable_window_secs: config.confirm_disable_window_secs,
        }
    }
}

// ---------------------------------------------------------------------------
// FocusContext
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct FocusContext {
    // -- Inputs --
    pub inputs: ButtonInputs,
    /// Seconds elapsed since the previous tick.
    pub dt_secs: f32,

    // -- Timers --
    /// Time the button has been held continuously while `Off`.
    pub hold_timer_secs: f32,
    /// Time left in the disable confirmation window.
    pub confirm_timer_secs: f32,

    // -- Output --
    /// Text for the display surface.
    pub display: &'static str,

    // -- Configuration --
    pub timing: FocusTiming,
}

impl FocusContext {
    pub fn new(timing: FocusTiming) -> Self {
        Self {
            inputs: ButtonInputs::default(),
            dt_secs: 0.0,
            hold_timer_secs: 0.0,
            confirm_timer_secs: 0.0,
            display: "",
            timing,
        }
    }

    /// Fraction of the hold threshold reached, for progress displays.
    pub fn hold_progress(&self) -> f32 {
        (self.hold_timer_secs / self.timing.hold_to_enable_secs).clamp(0.0, 1.0)
    }
}
