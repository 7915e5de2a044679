//! Monotonic clock adapter.
//!
//! Supplies the per-tick `dt` the state machine consumes, measured with
//! `std::time::Instant` so wall-clock jumps never distort timers.

use std::time::Instant;

pub struct MonotonicClock {
    start: Instant,
    last: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }

    /// Seconds since the previous `lap` (or since construction).
    pub fn lap(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }

    /// Seconds since construction.
    pub fn uptime_secs(&self) -> u64 {
        self.start.elapsed().as_secs()
    }
}
