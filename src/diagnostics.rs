//! Serial link diagnostics.
//!
//! Counters maintained by the [`LineDecoder`](crate::decoder::LineDecoder)
//! on every poll.  They are reported with telemetry and make a silent or
//! flaky sensor visible: a link whose `polls_since_sample` keeps growing
//! is feeding the state machine a stale button level.

use serde::{Deserialize, Serialize};

/// Runtime counters for the serial link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkMetrics {
    /// Total `poll` calls.
    pub polls: u64,
    /// Lines decoded into a sample.
    pub samples: u64,
    /// Lines that were empty after trimming.
    pub empty_lines: u64,
    /// Reads that found no complete line.
    pub timeouts: u64,
    /// Reads that failed with an I/O fault.
    pub read_faults: u64,
    /// Polls since the last decoded sample (0 on the tick a sample arrives).
    pub polls_since_sample: u64,
    /// Lines the transport discarded before decoding (overlong lines,
    /// backlog overflow, overwritten hand-offs).
    pub dropped_lines: u64,
    /// True once the port is known to be unavailable (open failed).
    pub source_unavailable: bool,
}

impl LinkMetrics {
    /// Fraction of polls that produced a sample.
    pub fn sample_ratio(&self) -> f32 {
        if self.polls == 0 {
            return 0.0;
        }
        self.samples as f32 / self.polls as f32
    }

    /// True if no sample has arrived for at least `polls` consecutive polls.
    pub fn is_stale(&self, polls: u64) -> bool {
        self.polls_since_sample >= polls
    }

    pub(crate) fn record_sample(&mut self) {
        self.polls += 1;
        self.samples += 1;
        self.polls_since_sample = 0;
    }

    pub(crate) fn record_empty(&mut self) {
        self.polls += 1;
        self.empty_lines += 1;
        self.polls_since_sample += 1;
    }

    pub(crate) fn record_timeout(&mut self) {
        self.polls += 1;
        self.timeouts += 1;
        self.polls_since_sample += 1;
    }

    pub(crate) fn record_fault(&mut self) {
        self.polls += 1;
        self.read_faults += 1;
        self.polls_since_sample += 1;
    }

    /// Sync the transport's running drop total.
    pub(crate) fn record_dropped(&mut self, total: u32) {
        self.dropped_lines = u64::from(total);
    }

    pub(crate) fn record_idle(&mut self) {
        self.polls += 1;
        self.polls_since_sample += 1;
    }
}
