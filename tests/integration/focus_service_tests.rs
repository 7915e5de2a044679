//! Integration tests for the LineSource → decoder → FSM → display pipeline.

use crate::mock_io::{RecordingDisplay, RecordingSink, ScriptedSource, Step};

use focuslink::app::events::AppEvent;
use focuslink::app::service::FocusService;
use focuslink::config::FocusConfig;
use focuslink::fsm::FocusMode;

const DT: f32 = 0.25;

fn config() -> FocusConfig {
    FocusConfig {
        telemetry_interval_secs: 0,
        ..FocusConfig::default()
    }
}

fn make_app(
    source: ScriptedSource,
) -> (FocusService<ScriptedSource>, RecordingDisplay, RecordingSink) {
    let mut app = FocusService::new(&config(), Some(source));
    let mut display = RecordingDisplay::new();
    let mut sink = RecordingSink::new();
    app.start(&mut display, &mut sink);
    (app, display, sink)
}

fn run(
    app: &mut FocusService<ScriptedSource>,
    display: &mut RecordingDisplay,
    sink: &mut RecordingSink,
    ticks: usize,
) {
    for _ in 0..ticks {
        app.tick(DT, display, sink);
    }
}

/// Script that holds the button long enough to enable, then releases.
fn enable_script() -> Vec<Step> {
    let mut steps = vec![Step::Line("L:500,B:1"); 8];
    steps.push(Step::Line("L:500,B:0"));
    steps
}

#[test]
fn start_shows_off_and_emits_started() {
    let (app, display, sink) = make_app(ScriptedSource::new([]));
    assert_eq!(app.mode(), FocusMode::Off);
    assert_eq!(display.last(), Some("Focus Mode Off"));
    assert!(matches!(sink.events[0], AppEvent::Started(FocusMode::Off)));
}

#[test]
fn hold_enables_focus_mode() {
    let (mut app, mut display, mut sink) = make_app(ScriptedSource::new(enable_script()));
    run(&mut app, &mut display, &mut sink, 7);
    assert_eq!(app.mode(), FocusMode::Off, "1.75s held");
    run(&mut app, &mut display, &mut sink, 1);
    assert_eq!(app.mode(), FocusMode::On);
    assert!(app.is_active());
    assert_eq!(display.last(), Some("Focus Mode On"));
    assert_eq!(sink.transitions(), [(FocusMode::Off, FocusMode::On)]);
}

#[test]
fn display_is_shown_once_per_tick() {
    let (mut app, mut display, mut sink) = make_app(ScriptedSource::new([]));
    run(&mut app, &mut display, &mut sink, 12);
    // One from start() plus one per tick.
    assert_eq!(display.shown.len(), 13);
}

#[test]
fn full_enable_then_disable_cycle() {
    let mut steps = enable_script();
    steps.extend([
        Step::Line("L:500,B:1"), // first press → confirm
        Step::Line("L:500,B:0"),
        Step::Line("L:500,B:1"), // second press → disabled
        Step::Line("L:500,B:0"),
    ]);
    let (mut app, mut display, mut sink) = make_app(ScriptedSource::new(steps));
    run(&mut app, &mut display, &mut sink, 13);

    assert_eq!(app.mode(), FocusMode::Off);
    assert_eq!(
        display.distinct(),
        [
            "Focus Mode Off",
            "Focus Mode On",
            "Disable Focus Mode?",
            "Focus Mode Disabled",
        ]
    );
    assert_eq!(
        sink.transitions(),
        [
            (FocusMode::Off, FocusMode::On),
            (FocusMode::On, FocusMode::ConfirmDisable),
            (FocusMode::ConfirmDisable, FocusMode::Off),
        ]
    );
}

#[test]
fn unconfirmed_disable_reverts_to_on() {
    let mut steps = enable_script();
    steps.push(Step::Line("L:500,B:1"));
    steps.push(Step::Line("L:500,B:0"));
    let (mut app, mut display, mut sink) = make_app(ScriptedSource::new(steps));
    run(&mut app, &mut display, &mut sink, 10);
    assert_eq!(app.mode(), FocusMode::ConfirmDisable);

    // The window starts counting on the tick after entry: 12 ticks of 0.25s.
    run(&mut app, &mut display, &mut sink, 11);
    assert_eq!(app.mode(), FocusMode::ConfirmDisable);
    run(&mut app, &mut display, &mut sink, 1);
    assert_eq!(app.mode(), FocusMode::On);
    assert_eq!(display.last(), Some("Focus Mode On"));
}

#[test]
fn brief_taps_never_enable() {
    let mut steps = Vec::new();
    for _ in 0..20 {
        steps.push(Step::Line("B:1"));
        steps.push(Step::Line("B:0"));
    }
    let (mut app, mut display, mut sink) = make_app(ScriptedSource::new(steps));
    run(&mut app, &mut display, &mut sink, 40);
    assert_eq!(app.mode(), FocusMode::Off);
    assert!(sink.transitions().is_empty());
}

#[test]
fn timeouts_keep_last_level_and_hold_keeps_counting() {
    // One pressed sample, then silence: the stale level keeps accumulating.
    let mut steps = vec![Step::Line("L:10,B:1")];
    steps.extend(std::iter::repeat_n(Step::Timeout, 10));
    let (mut app, mut display, mut sink) = make_app(ScriptedSource::new(steps));
    run(&mut app, &mut display, &mut sink, 8);
    assert_eq!(app.mode(), FocusMode::On);
    assert_eq!(app.metrics().timeouts, 7);
    assert_eq!(app.metrics().polls_since_sample, 7);
}

#[test]
fn read_faults_do_not_generate_presses() {
    let mut steps = enable_script();
    steps.extend(std::iter::repeat_n(Step::Fault, 20));
    let (mut app, mut display, mut sink) = make_app(ScriptedSource::new(steps));
    run(&mut app, &mut display, &mut sink, 29);
    assert_eq!(app.mode(), FocusMode::On);
    assert_eq!(app.metrics().read_faults, 20);
}

#[test]
fn malformed_lines_fall_back_per_field() {
    let steps = vec![
        Step::Line("L:1023,B:0"),
        Step::Line("L:##,B:1"),
        Step::Line("garbage"),
        Step::Line(""),
    ];
    let (mut app, mut display, mut sink) = make_app(ScriptedSource::new(steps));
    run(&mut app, &mut display, &mut sink, 4);
    let t = app.build_telemetry();
    assert_eq!(t.light_raw, 1023);
    assert!(t.button_level);
    assert_eq!(t.link.samples, 3);
    assert_eq!(t.link.empty_lines, 1);
}

#[test]
fn smoothed_reading_tracks_light() {
    let (mut app, mut display, mut sink) =
        make_app(ScriptedSource::repeat("L:1023,B:0", 100));
    run(&mut app, &mut display, &mut sink, 100);
    assert!((app.smoothed_reading() - 1.0).abs() < 1e-3);
}

#[test]
fn missing_port_runs_idle() {
    let mut app: FocusService<ScriptedSource> = FocusService::new(&config(), None);
    let mut display = RecordingDisplay::new();
    let mut sink = RecordingSink::new();
    app.start(&mut display, &mut sink);
    for _ in 0..50 {
        let report = app.tick(DT, &mut display, &mut sink);
        assert!(!report.fresh_sample);
        assert_eq!(report.display, "Focus Mode Off");
    }
    assert!(app.metrics().source_unavailable);
    assert_eq!(app.mode(), FocusMode::Off);
}

#[test]
fn telemetry_events_when_enabled() {
    let config = FocusConfig {
        telemetry_interval_secs: 1,
        ..FocusConfig::default()
    };
    let mut app = FocusService::new(&config, Some(ScriptedSource::repeat("L:0,B:0", 10)));
    let mut display = RecordingDisplay::new();
    let mut sink = RecordingSink::new();
    app.start(&mut display, &mut sink);
    for _ in 0..12 {
        app.tick(DT, &mut display, &mut sink);
    }
    let telemetry = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::Telemetry(_)))
        .count();
    assert_eq!(telemetry, 3);
}
