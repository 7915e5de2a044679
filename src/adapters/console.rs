//! Terminal display adapter.
//!
//! Implements [`DisplayPort`] by writing the status line to any
//! `io::Write` (stdout in the host binary).  The port is called every tick;
//! only a change of text produces output.

use std::io::Write;

use log::warn;

use crate::app::ports::DisplayPort;

pub struct ConsoleDisplay<W: Write> {
    out: W,
    current: String,
}

impl ConsoleDisplay<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            current: String::new(),
        }
    }

    /// Text currently on screen.
    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplayPort for ConsoleDisplay<W> {
    fn show(&mut self, text: &str) {
        if self.current == text {
            return;
        }
        self.current.clear();
        self.current.push_str(text);
        if let Err(e) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            warn!("display: write failed: {}", e);
        }
    }
}
