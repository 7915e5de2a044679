//! Line decoder — status lines in, button edge and smoothed light out.
//!
//! ```text
//!  LineSource ──▶ decode(line, previous) ──▶ DecoderState::apply ──▶ DecoderOutput
//!                                              ├─ normalise + IIR smooth
//!                                              └─ rising-edge detect
//! ```
//!
//! The decoder keeps its whole state in one [`DecoderState`] value so
//! tests can start from any configuration.  A tick with no new sample
//! (timeout, fault, empty line, or no port at all) leaves the state alone
//! apart from clearing the edge pulse: the last button level persists.

pub mod parse;
pub mod smoothing;

use log::{debug, trace};

use crate::diagnostics::LinkMetrics;
use crate::transport::{LineRead, LineSource};
use parse::{SensorSample, decode};
use smoothing::{normalize, smooth};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Button level plus a one-tick rising-edge pulse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonEdgeState {
    pub level: bool,
    pub rising_edge: bool,
}

/// Everything the decoder remembers between ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DecoderState {
    /// Last decoded sample; the fallback for malformed fields.
    pub sample: SensorSample,
    /// Smoothed, normalised light reading in `[0, 1]`.
    pub smoothed: f32,
    pub edge: ButtonEdgeState,
}

impl DecoderState {
    /// Clear the edge pulse.  Runs first on every tick so a caller never
    /// sees a stale pulse.
    pub fn begin_tick(&mut self) {
        self.edge.rising_edge = false;
    }

    /// Fold a freshly decoded sample into the state.
    pub fn apply(&mut self, sample: SensorSample, alpha: f32) {
        self.smoothed = smooth(self.smoothed, normalize(sample.raw), alpha);
        self.edge.rising_edge = sample.button_level && !self.edge.level;
        self.edge.level = sample.button_level;
        self.sample = sample;
    }

    /// One full tick over an optional line.  Returns `true` if the line
    /// produced a sample.
    pub fn advance(&mut self, line: Option<&str>, alpha: f32) -> bool {
        self.begin_tick();
        match line.and_then(|l| decode(l, self.sample)) {
            Some(sample) => {
                self.apply(sample, alpha);
                true
            }
            None => false,
        }
    }

    /// Snapshot for downstream consumers.
    pub fn output(&self, fresh: bool) -> DecoderOutput {
        DecoderOutput {
            level: self.edge.level,
            rising_edge: self.edge.rising_edge,
            smoothed: self.smoothed,
            raw: self.sample.raw,
            fresh,
        }
    }
}

/// Per-tick output contract consumed by the focus state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DecoderOutput {
    pub level: bool,
    pub rising_edge: bool,
    pub smoothed: f32,
    pub raw: i32,
    /// A new sample was decoded on this tick.
    pub fresh: bool,
}

// ---------------------------------------------------------------------------
// LineDecoder
// ---------------------------------------------------------------------------

/// Polls a [`LineSource`] once per tick and maintains a [`DecoderState`].
///
/// Constructed without a source (the port failed to open), every poll
/// reports "no sample" and the outputs stay at their initial values.
pub struct LineDecoder<S> {
    source: Option<S>,
    state: DecoderState,
    alpha: f32,
    metrics: LinkMetrics,
}

impl<S: LineSource> LineDecoder<S> {
    pub fn new(source: S, alpha: f32) -> Self {
        Self::with_state(Some(source), DecoderState::default(), alpha)
    }

    /// A decoder with no byte source; permanently idle.
    pub fn idle(alpha: f32) -> Self {
        let mut decoder = Self::with_state(None, DecoderState::default(), alpha);
        decoder.metrics.source_unavailable = true;
        decoder
    }

    pub fn with_state(source: Option<S>, state: DecoderState, alpha: f32) -> Self {
        Self {
            source,
            state,
            alpha,
            metrics: LinkMetrics::default(),
        }
    }

    /// Read at most one line and update state.  Never fails: timeouts,
    /// faults and empty lines all mean "no sample this tick".
    pub fn poll(&mut self) -> DecoderOutput {
        self.state.begin_tick();

        let Some(source) = self.source.as_mut() else {
            self.metrics.record_idle();
            return self.state.output(false);
        };

        let read = source.read_line();
        self.metrics.record_dropped(source.dropped_lines());

        match read {
            Ok(LineRead::Line(line)) => {
                if self.state.advance(Some(&line), self.alpha) {
                    self.metrics.record_sample();
                    trace!("decoder: {:?} -> {:?}", line, self.state.sample);
                    return self.state.output(true);
                }
                self.metrics.record_empty();
            }
            Ok(LineRead::TimedOut) => self.metrics.record_timeout(),
            Err(e) => {
                debug!("decoder: {}, no sample this tick", e);
                self.metrics.record_fault();
            }
        }
        self.state.output(false)
    }

    pub fn state(&self) -> &DecoderState {
        &self.state
    }

    pub fn metrics(&self) -> &LinkMetrics {
        &self.metrics
    }

    /// Whether a byte source is attached.
    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }
}
