//! Application service — the hexagonal core.
//!
//! [`FocusService`] owns the line decoder and the focus state machine.
//! All I/O flows through port traits injected at call sites, making the
//! whole service testable with mock adapters.
//!
//! ```text
//!  LineSource ──▶ ┌──────────────────────────────┐ ──▶ DisplayPort
//!                 │         FocusService         │
//!                 │  LineDecoder · FocusStateMachine │ ──▶ EventSink
//!                 └──────────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::FocusConfig;
use crate::decoder::{DecoderOutput, LineDecoder};
use crate::diagnostics::LinkMetrics;
use crate::fsm::context::FocusTiming;
use crate::fsm::{FocusMode, FocusStateMachine};
use crate::transport::LineSource;

use super::events::{AppEvent, TelemetryData};
use super::ports::{DisplayPort, EventSink};

// ───────────────────────────────────────────────────────────────
// TickReport
// ───────────────────────────────────────────────────────────────

/// What happened during one [`FocusService::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub display: &'static str,
    pub mode: FocusMode,
    /// The mode changed on this tick.
    pub changed: bool,
    /// The decoder produced a new sample on this tick.
    pub fresh_sample: bool,
}

// ───────────────────────────────────────────────────────────────
// FocusService
// ───────────────────────────────────────────────────────────────

pub struct FocusService<S> {
    decoder: LineDecoder<S>,
    machine: FocusStateMachine,
    last_output: DecoderOutput,
    /// 0 disables telemetry.
    telemetry_interval_secs: f32,
    since_telemetry_secs: f32,
    tick_count: u64,
}

impl<S: LineSource> FocusService<S> {
    /// Build from configuration.  `source` is `None` when the port could
    /// not be opened; the service then runs with an idle decoder.
    pub fn new(config: &FocusConfig, source: Option<S>) -> Self {
        let decoder = match source {
            Some(source) => LineDecoder::new(source, config.smoothing_alpha),
            None => {
                warn!("No serial source, focus toggle will stay idle");
                LineDecoder::idle(config.smoothing_alpha)
            }
        };
        let machine = FocusStateMachine::new(FocusTiming::from(config));
        Self::from_parts(decoder, machine, config.telemetry_interval_secs as f32)
    }

    /// Assemble from pre-built parts (e.g. a machine resumed mid-state).
    pub fn from_parts(
        decoder: LineDecoder<S>,
        machine: FocusStateMachine,
        telemetry_interval_secs: f32,
    ) -> Self {
        Self {
            last_output: decoder.state().output(false),
            decoder,
            machine,
            telemetry_interval_secs,
            since_telemetry_secs: 0.0,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Show the initial display text and announce the starting mode.
    pub fn start(&mut self, display: &mut impl DisplayPort, sink: &mut impl EventSink) {
        display.show(self.machine.display());
        sink.emit(&AppEvent::Started(self.machine.mode()));
        info!("FocusService started in {:?}", self.machine.mode());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one cycle: poll decoder → tick machine → show → emit events.
    pub fn tick(
        &mut self,
        dt_secs: f32,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) -> TickReport {
        self.tick_count += 1;
        let prev_mode = self.machine.mode();

        // 1. Decoder
        let out = self.decoder.poll();
        self.last_output = out;

        // 2. State machine
        let text = self.machine.tick(out.level, out.rising_edge, dt_secs);

        // 3. Display, exactly once per tick
        display.show(text);

        // 4. Mode change event
        let mode = self.machine.mode();
        let changed = mode != prev_mode;
        if changed {
            sink.emit(&AppEvent::ModeChanged {
                from: prev_mode,
                to: mode,
            });
        }

        // 5. Periodic telemetry
        if self.telemetry_interval_secs > 0.0 {
            self.since_telemetry_secs += dt_secs.max(0.0);
            if self.since_telemetry_secs >= self.telemetry_interval_secs {
                self.since_telemetry_secs = 0.0;
                sink.emit(&AppEvent::Telemetry(self.build_telemetry()));
            }
        }

        TickReport {
            display: text,
            mode,
            changed,
            fresh_sample: out.fresh,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn build_telemetry(&self) -> TelemetryData {
        TelemetryData {
            mode: self.machine.mode(),
            active: self.machine.is_active(),
            button_level: self.last_output.level,
            light_raw: self.last_output.raw,
            light_smoothed: self.last_output.smoothed,
            hold_progress: self.machine.context().hold_progress(),
            ticks_in_mode: self.machine.ticks_in_mode(),
            link: *self.decoder.metrics(),
        }
    }

    pub fn mode(&self) -> FocusMode {
        self.machine.mode()
    }

    pub fn is_active(&self) -> bool {
        self.machine.is_active()
    }

    /// Smoothed light reading in `[0, 1]`.
    pub fn smoothed_reading(&self) -> f32 {
        self.last_output.smoothed
    }

    pub fn metrics(&self) -> &LinkMetrics {
        self.decoder.metrics()
    }

    /// Total ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
