//! focuslink — host entry point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  SerialLineSource   ConsoleDisplay   LogEventSink            │
//! │  (LineSource)       (DisplayPort)    (EventSink)             │
//! │  JsonConfigFile     MonotonicClock                           │
//! │  (ConfigPort)       (tick dt)                                │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │            FocusService (pure logic)                   │  │
//! │  │  LineDecoder · FocusStateMachine                       │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{error, info};
use tracing_subscriber::EnvFilter;

use focuslink::adapters::config_file::JsonConfigFile;
use focuslink::adapters::console::ConsoleDisplay;
use focuslink::adapters::log_sink::LogEventSink;
use focuslink::adapters::time::MonotonicClock;
use focuslink::app::ports::ConfigPort;
use focuslink::app::service::FocusService;
use focuslink::config::FocusConfig;
use focuslink::transport::LineSource;
use focuslink::transport::serial::SerialLineSource;
use focuslink::transport::threaded::ThreadedLineSource;

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("focuslink v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = JsonConfigFile::from_env()
        .load()
        .context("failed to load configuration")?;

    // ── 3. Shutdown flag ──────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    ctrlc::set_handler({
        let running = Arc::clone(&running);
        move || running.store(false, Ordering::Release)
    })
    .context("failed to install Ctrl-C handler")?;

    // ── 4. Serial source (absent on open failure) ─────────────
    let source = open_source(&config);

    // ── 5. Service + adapters ─────────────────────────────────
    let mut app = FocusService::new(&config, source);
    let mut display = ConsoleDisplay::stdout();
    let mut sink = LogEventSink::new();
    let mut clock = MonotonicClock::new();
    app.start(&mut display, &mut sink);

    // ── 6. Host loop ──────────────────────────────────────────
    let step = Duration::from_millis(config.tick_interval_ms);
    while running.load(Ordering::Acquire) {
        let started = Instant::now();
        let dt = clock.lap();
        app.tick(dt, &mut display, &mut sink);

        if let Some(rest) = step.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }

    info!(
        "Shutting down after {} ticks ({}s), focus {}",
        app.tick_count(),
        clock.uptime_secs(),
        if app.is_active() { "active" } else { "off" }
    );
    // Dropping the service closes the port (and joins the reader thread).
    drop(app);
    Ok(())
}

/// Open the configured port.  Failure is reported once and the service
/// runs with an idle decoder.
fn open_source(config: &FocusConfig) -> Option<Box<dyn LineSource>> {
    let timeout = Duration::from_millis(config.read_timeout_ms);
    let serial = match SerialLineSource::open(&config.port_name, config.baud_rate, timeout) {
        Ok(serial) => serial,
        Err(e) => {
            error!("{} ({}), continuing without input", e, config.port_name);
            return None;
        }
    };

    if !config.threaded_reader {
        return Some(Box::new(serial));
    }
    match ThreadedLineSource::spawn(serial) {
        Ok(threaded) => Some(Box::new(threaded)),
        Err(e) => {
            error!("failed to start reader thread: {}, continuing without input", e);
            None
        }
    }
}
