//! Newline frame codec.
//!
//! Wire format:
//! ```text
//! ┌──────────────────────────────┬────────────┐
//! │ ASCII payload (≤ 128 B)      │ \n or \r\n │
//! └──────────────────────────────┴────────────┘
//! ```
//!
//! The framer accumulates incoming bytes and yields complete lines.  A
//! single serial read may return part of a line, several lines, or a line
//! cut in half by a microcontroller reset; partial data is carried over to
//! the next `feed`.

use std::collections::VecDeque;

/// Maximum line payload (protects against a stream with no newlines).
pub const MAX_LINE_LEN: usize = 128;

/// Upper bound on complete lines buffered between `pop_line` calls.
const MAX_PENDING_LINES: usize = 16;

enum FramerState {
    /// Collecting payload bytes.
    Collecting,
    /// Current line overflowed; skip until the next newline.
    Discarding,
}

/// Streaming line framer.
pub struct LineFramer {
    state: FramerState,
    buf: heapless::Vec<u8, MAX_LINE_LEN>,
    pending: VecDeque<String>,
    dropped: u32,
}

impl Default for LineFramer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineFramer {
    pub fn new() -> Self {
        Self {
            state: FramerState::Collecting,
            buf: heapless::Vec::new(),
            pending: VecDeque::new(),
            dropped: 0,
        }
    }

    /// Feed raw bytes.  Complete lines are queued for [`pop_line`](Self::pop_line).
    pub fn feed(&mut self, data: &[u8]) {
        for &byte in data {
            match self.state {
                FramerState::Collecting => {
                    if byte == b'\n' {
                        self.finish_line();
                    } else if self.buf.push(byte).is_err() {
                        log::debug!("framer: line exceeds {} bytes, discarding", MAX_LINE_LEN);
                        self.buf.clear();
                        self.dropped = self.dropped.saturating_add(1);
                        self.state = FramerState::Discarding;
                    }
                }
                FramerState::Discarding => {
                    if byte == b'\n' {
                        self.state = FramerState::Collecting;
                    }
                }
            }
        }
    }

    /// Oldest complete line, if any.
    pub fn pop_line(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    /// Whether a complete line is waiting.
    pub fn has_line(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Lines thrown away because they overflowed or the queue was full.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Discard any partial line and queued lines.
    pub fn reset(&mut self) {
        self.state = FramerState::Collecting;
        self.buf.clear();
        self.pending.clear();
    }

    fn finish_line(&mut self) {
        let mut payload: &[u8] = &self.buf;
        if let [rest @ .., b'\r'] = payload {
            payload = rest;
        }
        let line = String::from_utf8_lossy(payload).into_owned();
        self.buf.clear();

        if self.pending.len() == MAX_PENDING_LINES {
            // Keep the newest data; the oldest line is stale anyway.
            self.pending.pop_front();
            self.dropped = self.dropped.saturating_add(1);
        }
        self.pending.push_back(line);
    }
}
