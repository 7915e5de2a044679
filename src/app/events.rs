//! Outbound application events.
//!
//! The [`FocusService`](super::service::FocusService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use serde::Serialize;

use crate::diagnostics::LinkMetrics;
use crate::fsm::FocusMode;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started (carries initial mode).
    Started(FocusMode),

    /// The focus state machine changed mode.
    ModeChanged { from: FocusMode, to: FocusMode },

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging.
#[derive(Debug, Clone, Serialize)]
pub struct TelemetryData {
    pub mode: FocusMode,
    pub active: bool,
    pub button_level: bool,
    pub light_raw: i32,
    pub light_smoothed: f32,
    pub hold_progress: f32,
    /// Ticks spent in the current mode.
    pub ticks_in_mode: u64,
    pub link: LinkMetrics,
}
