//! Fuzz target: `decode` + `FocusStateMachine::tick`
//!
//! Treats the input as newline-separated status lines, decodes each into
//! the running decoder state and drives the focus machine with the result.
//! Must never panic and never produce a smoothed value outside `[0, 1]`.
//!
//! cargo fuzz run fuzz_line_decoder

#![no_main]

use focuslink::decoder::DecoderState;
use focuslink::fsm::FocusStateMachine;
use focuslink::fsm::context::FocusTiming;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let mut state = DecoderState::default();
    let mut machine = FocusStateMachine::new(FocusTiming::default());

    for line in text.split('\n') {
        state.advance(Some(line), 0.1);
        let out = state.output(true);
        assert!((-1e-6..=1.0 + 1e-6).contains(&out.smoothed));
        machine.tick(out.level, out.rising_edge, 0.02);
    }
});
