//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements   | Connects to                |
//! |---------------|--------------|----------------------------|
//! | `config_file` | ConfigPort   | JSON file on disk          |
//! | `console`     | DisplayPort  | Terminal / any `io::Write` |
//! | `log_sink`    | EventSink    | `log` facade               |
//! | `time`        | —            | Monotonic tick clock       |
//!
//! The serial byte source lives in [`crate::transport`].

pub mod config_file;
pub mod console;
pub mod log_sink;
pub mod time;
