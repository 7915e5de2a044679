//! Serial link error type.
//!
//! All variants are `Copy`; the underlying OS error text is logged at the
//! point of failure rather than carried along.  Configuration failures use
//! [`ConfigError`](crate::app::ports::ConfigError) on the config port, and
//! the host binary wraps both in `anyhow`.

use core::fmt;

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

/// Failures of the byte source.  A read timeout is *not* an error; it is
/// reported as [`LineRead::TimedOut`](crate::transport::LineRead::TimedOut).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The port could not be opened at startup.
    OpenFailed,
    /// An I/O failure other than a timeout during a read.
    ReadFault,
    /// The background reader thread has stopped.
    Disconnected,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenFailed => write!(f, "serial port open failed"),
            Self::ReadFault => write!(f, "serial read fault"),
            Self::Disconnected => write!(f, "serial reader disconnected"),
        }
    }
}

impl std::error::Error for TransportError {}
