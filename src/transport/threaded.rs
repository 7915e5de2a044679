//! Background reader thread with a single-slot hand-off.
//!
//! ```text
//! ┌───────────────┐  signal(line)  ┌──────────────┐  try_take()  ┌───────────┐
//! │ reader thread │──────────────▶│ Signal<String>│────────────▶│ tick loop │
//! │ (blocking I/O)│   overwrites   └──────────────┘  never blocks└───────────┘
//! └───────────────┘
//! ```
//!
//! The slot holds only the most recent line: a tick that runs slower than
//! the microcontroller sends sees the newest sample, never a backlog.
//! Overwritten lines are counted with the inner source's own drops.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use log::{info, warn};

use super::{LineRead, LineSource};
use crate::error::TransportError;

/// Pause after a read fault so a dead port does not spin the thread.
const FAULT_BACKOFF: Duration = Duration::from_millis(100);

type LatestLine = Signal<CriticalSectionRawMutex, String>;

/// Non-blocking [`LineSource`] fed by a reader thread.
pub struct ThreadedLineSource {
    latest: Arc<LatestLine>,
    stop: Arc<AtomicBool>,
    dropped: Arc<AtomicU32>,
    handle: Option<JoinHandle<()>>,
}

impl ThreadedLineSource {
    /// Move `source` onto a new thread.  The source is dropped (and its
    /// handle released) on that thread when this value is dropped.
    pub fn spawn<S>(source: S) -> std::io::Result<Self>
    where
        S: LineSource + Send + 'static,
    {
        let latest = Arc::new(LatestLine::new());
        let stop = Arc::new(AtomicBool::new(false));
        let dropped = Arc::new(AtomicU32::new(0));

        let handle = thread::Builder::new().name("serial-reader".into()).spawn({
            let latest = Arc::clone(&latest);
            let stop = Arc::clone(&stop);
            let dropped = Arc::clone(&dropped);
            move || reader_loop(source, &latest, &stop, &dropped)
        })?;

        Ok(Self {
            latest,
            stop,
            dropped,
            handle: Some(handle),
        })
    }
}

fn reader_loop<S: LineSource>(
    mut source: S,
    latest: &LatestLine,
    stop: &AtomicBool,
    dropped: &AtomicU32,
) {
    info!("reader: thread started");
    let mut overwritten: u32 = 0;
    while !stop.load(Ordering::Acquire) {
        match source.read_line() {
            Ok(LineRead::Line(line)) => {
                if latest.signaled() {
                    overwritten = overwritten.saturating_add(1);
                }
                dropped.store(
                    source.dropped_lines().saturating_add(overwritten),
                    Ordering::Release,
                );
                latest.signal(line);
            }
            Ok(LineRead::TimedOut) => {}
            Err(e) => {
                warn!("reader: {}", e);
                thread::sleep(FAULT_BACKOFF);
            }
        }
    }
    drop(source);
    info!("reader: thread stopped");
}

impl LineSource for ThreadedLineSource {
    fn read_line(&mut self) -> Result<LineRead, TransportError> {
        if let Some(line) = self.latest.try_take() {
            return Ok(LineRead::Line(line));
        }
        match &self.handle {
            Some(h) if !h.is_finished() => Ok(LineRead::TimedOut),
            _ => Err(TransportError::Disconnected),
        }
    }

    fn dropped_lines(&self) -> u32 {
        self.dropped.load(Ordering::Acquire)
    }
}

impl Drop for ThreadedLineSource {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("reader: thread panicked");
            }
        }
    }
}
