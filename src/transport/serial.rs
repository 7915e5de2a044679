//! Serial port line source.
//!
//! Wraps a `serialport` handle (or any [`DeadlineRead`] in tests) and a
//! [`LineFramer`].  Each `read_line` waits at most `timeout` for a complete
//! line: before every read the port timeout is narrowed to what is left of
//! that budget, so a slowly trickling line cannot stretch the wait.  The
//! port is closed when the source is dropped.

use std::io::{ErrorKind, Read};
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use serialport::SerialPort;

use super::framer::LineFramer;
use super::{LineRead, LineSource};
use crate::error::TransportError;

const READ_CHUNK: usize = 64;

/// A byte reader whose blocking wait can be bounded per call.
pub trait DeadlineRead: Read {
    /// Bound the next `read` to `timeout`.  Readers without a timeout knob
    /// ignore it.
    fn set_read_timeout(&mut self, _timeout: Duration) {}
}

impl DeadlineRead for Box<dyn SerialPort> {
    fn set_read_timeout(&mut self, timeout: Duration) {
        if let Err(e) = self.set_timeout(timeout) {
            debug!("serial: could not set timeout: {}", e);
        }
    }
}

/// Bounded-wait line reader over a byte stream.
pub struct SerialLineSource<R: DeadlineRead = Box<dyn SerialPort>> {
    port: R,
    framer: LineFramer,
    timeout: Duration,
    name: String,
}

impl SerialLineSource {
    /// Open `name` at `baud`.  DTR and RTS are asserted so boards that
    /// gate their USB-serial bridge on them start talking.
    pub fn open(name: &str, baud: u32, timeout: Duration) -> Result<Self, TransportError> {
        let mut port = serialport::new(name, baud)
            .timeout(timeout)
            .open()
            .map_err(|e| {
                warn!("serial: failed to open {} @ {}: {}", name, baud, e);
                TransportError::OpenFailed
            })?;

        if let Err(e) = port.write_data_terminal_ready(true) {
            debug!("serial: could not assert DTR: {}", e);
        }
        if let Err(e) = port.write_request_to_send(true) {
            debug!("serial: could not assert RTS: {}", e);
        }

        info!("serial: opened {} @ {} baud", name, baud);
        Ok(Self::from_reader(port, name, timeout))
    }
}

impl<R: DeadlineRead> SerialLineSource<R> {
    /// Build a source over an already-open reader.
    pub fn from_reader(port: R, name: &str, timeout: Duration) -> Self {
        Self {
            port,
            framer: LineFramer::new(),
            timeout,
            name: name.to_owned(),
        }
    }
}

impl<R: DeadlineRead> LineSource for SerialLineSource<R> {
    fn read_line(&mut self) -> Result<LineRead, TransportError> {
        if let Some(line) = self.framer.pop_line() {
            return Ok(LineRead::Line(line));
        }

        let deadline = Instant::now() + self.timeout;
        let mut chunk = [0u8; READ_CHUNK];

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(LineRead::TimedOut);
            }
            self.port.set_read_timeout(remaining);

            match self.port.read(&mut chunk) {
                Ok(0) => return Ok(LineRead::TimedOut),
                Ok(n) => {
                    self.framer.feed(&chunk[..n]);
                    if let Some(line) = self.framer.pop_line() {
                        return Ok(LineRead::Line(line));
                    }
                }
                Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => {
                    return Ok(LineRead::TimedOut);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    warn!("serial: read error on {}: {}", self.name, e);
                    return Err(TransportError::ReadFault);
                }
            }
        }
    }

    /// Lines discarded by the framer (overflow or backlog).
    fn dropped_lines(&self) -> u32 {
        self.framer.dropped()
    }
}

impl<R: DeadlineRead> Drop for SerialLineSource<R> {
    fn drop(&mut self) {
        info!("serial: closing {}", self.name);
    }
}
