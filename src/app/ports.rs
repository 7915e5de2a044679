//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ FocusService (domain)
//! ```
//!
//! Driven adapters (display, event sinks, config storage) implement these
//! traits.  The [`FocusService`](super::service::FocusService) consumes them
//! via generics, so the domain core never touches a terminal or a file.
//! The byte-source port lives in [`crate::transport`].

use crate::config::FocusConfig;

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → user)
// ───────────────────────────────────────────────────────────────

/// Anything that can show a one-line status to the user.
pub trait DisplayPort {
    /// Called exactly once per tick.  Repeating the same text must be
    /// harmless.
    fn show(&mut self, text: &str);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: storage → domain)
// ───────────────────────────────────────────────────────────────

/// Loads startup configuration.
///
/// Implementations MUST validate what they load and reject invalid
/// values with [`ConfigError::ValidationFailed`], not clamp them.
pub trait ConfigPort {
    /// Returns [`FocusConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<FocusConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ConfigError {
    /// Stored config failed to deserialize.
    Corrupted,
    /// A config field failed range validation.
    ValidationFailed(&'static str),
    /// The backing file exists but could not be read.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
