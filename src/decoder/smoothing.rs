//! Light reading normalisation and first-order IIR smoothing.

/// Full-scale value of the microcontroller's 10-bit ADC.
pub const RAW_FULL_SCALE: f32 = 1023.0;

/// Map a raw reading onto `[0, 1]`, clamping out-of-range values.
pub fn normalize(raw: i32) -> f32 {
    (raw as f32 / RAW_FULL_SCALE).clamp(0.0, 1.0)
}

/// One step of `smoothed + (target - smoothed) * alpha`.
pub fn smooth(smoothed: f32, target: f32, alpha: f32) -> f32 {
    smoothed + (target - smoothed) * alpha
}
