//! Status line grammar.
//!
//! ```text
//! line  := token ("," token)*
//! token := "L:" int      raw light reading, nominally 0..1023
//!        | "B:" int      button level, 1 = pressed
//!        | anything else (ignored)
//! ```
//!
//! Parsing is best-effort: a field whose integer does not parse keeps the
//! value from the previous sample, so a single corrupted byte never drops
//! the whole line.

use log::trace;

/// The decoded content of one status line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorSample {
    /// Raw analog value.  Not clamped here; see [`normalize`](super::smoothing::normalize).
    pub raw: i32,
    /// True while the button is held.
    pub button_level: bool,
}

/// Decode `line` on top of `previous`.
///
/// Returns `None` only for a line that is empty after trimming.  Any
/// non-empty line yields a sample, with unparsable fields falling back to
/// `previous`.  Duplicate tokens: the last one wins.
pub fn decode(line: &str, previous: SensorSample) -> Option<SensorSample> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let mut sample = previous;
    for token in line.split(',').map(str::trim) {
        if let Some(value) = token.strip_prefix("L:") {
            match value.trim().parse::<i32>() {
                Ok(raw) => sample.raw = raw,
                Err(_) => trace!("decode: malformed light field {:?}", token),
            }
        } else if let Some(value) = token.strip_prefix("B:") {
            match value.trim().parse::<i32>() {
                Ok(level) => sample.button_level = level == 1,
                Err(_) => trace!("decode: malformed button field {:?}", token),
            }
        }
    }
    Some(sample)
}
