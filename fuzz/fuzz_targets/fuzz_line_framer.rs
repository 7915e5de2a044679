//! Fuzz target: `LineFramer::feed`
//!
//! Feeds arbitrary bytes, split at a fuzzer-chosen point, and checks that
//! emitted lines never carry a newline and that a reset leaves the framer
//! usable.
//!
//! cargo fuzz run fuzz_line_framer

#![no_main]

use focuslink::transport::framer::{LineFramer, MAX_LINE_LEN};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let at = split as usize % (rest.len() + 1);

    let mut framer = LineFramer::new();
    framer.feed(&rest[..at]);
    framer.feed(&rest[at..]);

    while let Some(line) = framer.pop_line() {
        assert!(!line.contains('\n'), "framed line contains a newline");
        // Each invalid byte may widen to a 3-byte replacement character.
        assert!(line.len() <= MAX_LINE_LEN * 3);
    }

    framer.reset();
    framer.feed(b"L:1,B:1\n");
    assert_eq!(framer.pop_line().as_deref(), Some("L:1,B:1"));
});
