//! Mock adapters for integration tests.
//!
//! Records every display update and event so tests can assert on the full
//! history, and replays scripted serial input tick by tick.

use std::collections::VecDeque;
use std::io::{self, ErrorKind, Read};

use focuslink::app::events::AppEvent;
use focuslink::app::ports::{DisplayPort, EventSink};
use focuslink::error::TransportError;
use focuslink::fsm::FocusMode;
use focuslink::transport::serial::DeadlineRead;
use focuslink::transport::{LineRead, LineSource};

// ── ScriptedSource ────────────────────────────────────────────

/// One tick's worth of transport behaviour.
#[derive(Debug, Clone)]
pub enum Step {
    Line(&'static str),
    Timeout,
    Fault,
}

/// Line source that replays a script, then times out forever.
pub struct ScriptedSource {
    steps: VecDeque<Step>,
}

#[allow(dead_code)]
impl ScriptedSource {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    /// `line` repeated `n` times.
    pub fn repeat(line: &'static str, n: usize) -> Self {
        Self::new(std::iter::repeat_n(Step::Line(line), n))
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push_back(step);
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl LineSource for ScriptedSource {
    fn read_line(&mut self) -> Result<LineRead, TransportError> {
        match self.steps.pop_front() {
            Some(Step::Line(line)) => Ok(LineRead::Line(line.to_owned())),
            Some(Step::Timeout) | None => Ok(LineRead::TimedOut),
            Some(Step::Fault) => Err(TransportError::ReadFault),
        }
    }
}

// ── ByteScript (raw serial bytes) ─────────────────────────────

/// `Read` impl that hands out scripted byte chunks, then times out.
pub struct ByteScript {
    chunks: VecDeque<Vec<u8>>,
}

impl ByteScript {
    pub fn new(chunks: &[&[u8]]) -> Self {
        Self {
            chunks: chunks.iter().map(|c| c.to_vec()).collect(),
        }
    }
}

impl Read for ByteScript {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.chunks.pop_front() {
            Some(chunk) => {
                let n = chunk.len().min(buf.len());
                buf[..n].copy_from_slice(&chunk[..n]);
                if n < chunk.len() {
                    self.chunks.push_front(chunk[n..].to_vec());
                }
                Ok(n)
            }
            None => Err(io::Error::new(ErrorKind::TimedOut, "no data")),
        }
    }
}

impl DeadlineRead for ByteScript {}

// ── RecordingDisplay ──────────────────────────────────────────

#[derive(Default)]
pub struct RecordingDisplay {
    pub shown: Vec<String>,
}

#[allow(dead_code)]
impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&str> {
        self.shown.last().map(String::as_str)
    }

    /// Display history with consecutive duplicates collapsed.
    pub fn distinct(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for text in &self.shown {
            if out.last() != Some(&text.as_str()) {
                out.push(text);
            }
        }
        out
    }
}

impl DisplayPort for RecordingDisplay {
    fn show(&mut self, text: &str) {
        self.shown.push(text.to_owned());
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transitions(&self) -> Vec<(FocusMode, FocusMode)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::ModeChanged { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
