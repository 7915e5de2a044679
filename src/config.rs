//! System configuration parameters
//!
//! All tunable parameters for focuslink.  Values are fixed at startup; the
//! host binary loads them through a [`ConfigPort`](crate::app::ports::ConfigPort)
//! and falls back to [`FocusConfig::default`].

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    // --- Focus timing ---
    /// Continuous hold required to enable focus mode (seconds)
    pub hold_to_enable_secs: f32,
    /// Window for the second press that confirms disabling (seconds)
    pub confirm_disable_window_secs: f32,

    // --- Decoder ---
    /// IIR low-pass coefficient applied to the normalised light reading (0-1]
    pub smoothing_alpha: f32,

    // --- Serial link ---
    /// OS name of the serial port
    pub port_name: String,
    /// Baud rate, must match the microcontroller's `Serial.begin()`
    pub baud_rate: u32,
    /// Upper bound on a single line read (milliseconds)
    pub read_timeout_ms: u64,
    /// Read the port on a background thread instead of inline
    pub threaded_reader: bool,

    // --- Timing ---
    /// Host loop step (milliseconds)
    pub tick_interval_ms: u64,
    /// Telemetry report interval (seconds, 0 = off)
    pub telemetry_interval_secs: u32,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            // Focus timing
            hold_to_enable_secs: 2.0,
            confirm_disable_window_secs: 3.0,

            // Decoder
            smoothing_alpha: 0.1,

            // Serial link
            port_name: String::from("/dev/ttyACM0"),
            baud_rate: 9600,
            read_timeout_ms: 100,
            threaded_reader: false,

            // Timing
            tick_interval_ms: 20,        // 50 Hz
            telemetry_interval_secs: 30,
        }
    }
}

impl FocusConfig {
    /// Reject out-of-range values.  Nothing is clamped: a bad config file
    /// must fail loudly rather than run with surprising timing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.hold_to_enable_secs.is_finite() && self.hold_to_enable_secs > 0.0) {
            return Err(ConfigError::ValidationFailed(
                "hold_to_enable_secs must be a positive number",
            ));
        }
        if !(self.confirm_disable_window_secs.is_finite() && self.confirm_disable_window_secs > 0.0)
        {
            return Err(ConfigError::ValidationFailed(
                "confirm_disable_window_secs must be a positive number",
            ));
        }
        if !(self.smoothing_alpha > 0.0 && self.smoothing_alpha <= 1.0) {
            return Err(ConfigError::ValidationFailed(
                "smoothing_alpha must be in (0, 1]",
            ));
        }
        if self.port_name.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("port_name must not be empty"));
        }
        if self.baud_rate == 0 {
            return Err(ConfigError::ValidationFailed("baud_rate must be non-zero"));
        }
        if self.read_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "read_timeout_ms must be non-zero",
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "tick_interval_ms must be non-zero",
            ));
        }
        Ok(())
    }
}
