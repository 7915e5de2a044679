//! Line-oriented byte source — the port the decoder reads from.
//!
//! ```text
//!  serial port ──▶ LineFramer ──▶ LineSource::read_line ──▶ LineDecoder
//! ```
//!
//! A `LineSource` hands out at most one complete text line per call.  A
//! read that finds no complete line within its bounded wait returns
//! [`LineRead::TimedOut`]; this is the normal "no sample this tick"
//! outcome and is never reported as an error.  The handle is released when
//! the source is dropped.

pub mod framer;
pub mod serial;
pub mod threaded;

use crate::error::TransportError;

/// Outcome of a single bounded read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRead {
    /// One complete line, terminator stripped.
    Line(String),
    /// No complete line arrived within the read timeout.
    TimedOut,
}

/// Anything that can produce newline-delimited text lines.
pub trait LineSource {
    fn read_line(&mut self) -> Result<LineRead, TransportError>;

    /// Running total of complete or partial lines this source threw away
    /// (overlong, backlogged or overwritten).  Sources that never drop
    /// keep the default.
    fn dropped_lines(&self) -> u32 {
        0
    }
}

impl<S: LineSource + ?Sized> LineSource for Box<S> {
    fn read_line(&mut self) -> Result<LineRead, TransportError> {
        (**self).read_line()
    }

    fn dropped_lines(&self) -> u32 {
        (**self).dropped_lines()
    }
}
