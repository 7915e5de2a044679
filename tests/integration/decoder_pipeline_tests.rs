//! Byte-level tests: raw serial chunks through the framer, the serial line
//! source and the decoder.

use std::time::Duration;

use crate::mock_io::ByteScript;

use focuslink::decoder::LineDecoder;
use focuslink::transport::serial::SerialLineSource;

fn decoder(chunks: &[&[u8]]) -> LineDecoder<SerialLineSource<ByteScript>> {
    let source =
        SerialLineSource::from_reader(ByteScript::new(chunks), "mock", Duration::from_millis(100));
    LineDecoder::new(source, 0.1)
}

#[test]
fn edge_sequence_from_raw_bytes() {
    let mut d = decoder(&[b"L:10,B:0\nL:10,B:1\n", b"L:10,B:1\n"]);
    let edges: Vec<bool> = (0..3).map(|_| d.poll().rising_edge).collect();
    assert_eq!(edges, [false, true, false]);
}

#[test]
fn truncated_line_is_completed_by_next_chunk() {
    let mut d = decoder(&[b"L:7", b"00,B:1\r\n"]);
    let out = d.poll();
    assert!(out.fresh);
    assert_eq!(out.raw, 700);
    assert!(out.level);
}

#[test]
fn silence_is_a_timeout_not_a_fault() {
    let mut d = decoder(&[]);
    let out = d.poll();
    assert!(!out.fresh);
    assert_eq!(d.metrics().timeouts, 1);
    assert_eq!(d.metrics().read_faults, 0);
}

#[test]
fn noise_burst_then_recovery() {
    let noise = vec![0xAAu8; 300];
    let mut d = decoder(&[noise.as_slice(), b"\nL:512,B:1\n".as_slice()]);
    let out = d.poll();
    assert!(out.fresh);
    assert_eq!(out.raw, 512);
    assert!(out.rising_edge);
    assert_eq!(d.metrics().dropped_lines, 1);
}

#[test]
fn blank_lines_are_skipped_without_smoothing() {
    let mut d = decoder(&[b"L:1023,B:0\n\r\n"]);
    let first = d.poll();
    let second = d.poll();
    assert!(first.fresh);
    assert!(!second.fresh);
    assert!((first.smoothed - second.smoothed).abs() < f32::EPSILON);
}

#[test]
fn overlong_lines_show_up_in_link_metrics() {
    let noise = vec![b'9'; 200];
    let mut d = decoder(&[
        noise.as_slice(),
        b"\n".as_slice(),
        noise.as_slice(),
        b"\nL:1,B:0\n".as_slice(),
    ]);
    let out = d.poll();
    assert!(out.fresh);
    assert_eq!(out.raw, 1);
    assert_eq!(d.metrics().dropped_lines, 2);
}
