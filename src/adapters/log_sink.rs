//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events
//! through the `log` facade.

use log::{info, warn};

use crate::app::events::{AppEvent, TelemetryData};
use crate::app::ports::EventSink;

/// Polls without a sample before telemetry flags the link as stale
/// (5 s at the default 20 ms tick).
pub const STALE_POLLS: u64 = 250;

/// Adapter that logs every [`AppEvent`].
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!("{}", format_telemetry(t));
                if t.link.source_unavailable {
                    warn!("TELEM | serial source unavailable, toggle is idle");
                } else if t.link.is_stale(STALE_POLLS) {
                    warn!(
                        "TELEM | no sample for {} polls, button level is stale",
                        t.link.polls_since_sample
                    );
                }
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE | {:?} -> {:?}", from, to);
            }
            AppEvent::Started(mode) => {
                info!("START | initial_mode={:?}", mode);
            }
        }
    }
}

fn format_telemetry(t: &TelemetryData) -> String {
    format!(
        "TELEM | mode={:?} for {} ticks | button={} | light={} ({:.3}) | hold={:.0}% | \
         samples={} ({:.0}%) timeouts={} faults={} dropped={} stale_polls={}",
        t.mode,
        t.ticks_in_mode,
        if t.button_level { "DOWN" } else { "UP" },
        t.light_raw,
        t.light_smoothed,
        t.hold_progress * 100.0,
        t.link.samples,
        t.link.sample_ratio() * 100.0,
        t.link.timeouts,
        t.link.read_faults,
        t.link.dropped_lines,
        t.link.polls_since_sample,
    )
}
