//! Numeric collaborators shared by the block path.
//!
//! Every function here is pure and allocation-free.

use std::f32::consts::TAU;

/// Highest note index with a defined frequency; larger notes clamp here.
pub const NOTE_MAX: u8 = 151;
/// Ceiling applied to any derived oscillator frequency, in Hz.
pub const NOTE_MAX_HZ: f32 = 23_679.643;
/// Largest Q31 magnitude produced at the output boundary.
pub const Q31_MAX: i32 = 0x7FFF_FFFF;

const NOTE_FINE_SCALE: f32 = 1.0 / 255.0;
const PARAM_MAX: u16 = 1023;
const PARAM_SCALE: f32 = 1.0 / PARAM_MAX as f32;
const Q31_SCALE: f32 = 1.0 / 2_147_483_648.0;

/// Linear interpolation from `a` to `b` by `fr`.
#[inline]
pub fn lerp(fr: f32, a: f32, b: f32) -> f32 {
    a + fr * (b - a)
}

/// Wrap any real into [0, 1).
#[inline]
pub fn wrap_unit(x: f32) -> f32 {
    let p = x - x.floor();
    // x slightly below zero rounds up to exactly 1.0
    if p >= 1.0 {
        0.0
    } else {
        p
    }
}

/// Equal-tempered frequency of a note index (A4 = 69 = 440 Hz).
#[inline]
pub fn note_hz(note: u8) -> f32 {
    let n = note.min(NOTE_MAX) as f32;
    440.0 * ((n - 69.0) / 12.0).exp2()
}

/// Per-sample phase increment for a note plus a fine fraction (0..=255).
#[inline]
pub fn w0_for_note(note: u8, fine: u8, sample_rate: f32) -> f32 {
    let f0 = note_hz(note);
    let f1 = note_hz(note.saturating_add(1));
    let f = lerp(fine as f32 * NOTE_FINE_SCALE, f0, f1).min(NOTE_MAX_HZ);
    f / sample_rate
}

/// Raw 10-bit host parameter value to [0, 1].
#[inline]
pub fn param_val_to_f32(value: u16) -> f32 {
    value.min(PARAM_MAX) as f32 * PARAM_SCALE
}

#[inline]
pub fn q31_to_f32(q: i32) -> f32 {
    q as f32 * Q31_SCALE
}

/// Float in [-1, 1] to Q31, saturating out-of-range input. NaN maps to zero.
#[inline]
pub fn f32_to_q31(x: f32) -> i32 {
    if x.is_nan() {
        return 0;
    }
    let scaled = x.clamp(-1.0, 1.0) * Q31_MAX as f32;
    (scaled as i32).max(-Q31_MAX)
}

/// Cubic soft clip: clamp to [-1, 1], then `x - c*x^3`.
#[inline]
pub fn softclip(c: f32, x: f32) -> f32 {
    let x = x.clamp(-1.0, 1.0);
    x - c * (x * x * x)
}

/// Sine of a phase expressed in turns; wraps any input.
#[inline]
pub fn sin_turns(x: f32) -> f32 {
    (TAU * wrap_unit(x)).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_is_440() {
        assert!((note_hz(69) - 440.0).abs() < 1e-3);
        assert!((note_hz(81) - 880.0).abs() < 1e-2);
    }

    #[test]
    fn note_clamps_at_max() {
        assert_eq!(note_hz(NOTE_MAX), note_hz(255));
    }

    #[test]
    fn w0_interpolates_fine() {
        let sr = 48_000.0;
        let lo = w0_for_note(60, 0, sr);
        let hi = w0_for_note(61, 0, sr);
        let mid = w0_for_note(60, 128, sr);
        assert!(lo < mid && mid < hi);
        assert!((w0_for_note(60, 255, sr) - hi).abs() < 1e-7);
        assert!((w0_for_note(69, 0, sr) - 440.0 / sr).abs() < 1e-7);
    }

    #[test]
    fn w0_ceiling() {
        let w0 = w0_for_note(255, 255, 48_000.0);
        assert!((w0 - NOTE_MAX_HZ / 48_000.0).abs() < 1e-7);
        assert!(w0 < 0.5);
    }

    #[test]
    fn q31_saturates() {
        assert_eq!(f32_to_q31(1.0), Q31_MAX);
        assert_eq!(f32_to_q31(4.0), Q31_MAX);
        assert_eq!(f32_to_q31(-1.0), -Q31_MAX);
        assert_eq!(f32_to_q31(-7.5), -Q31_MAX);
        assert_eq!(f32_to_q31(f32::NAN), 0);
        assert_eq!(f32_to_q31(0.0), 0);
        assert!((q31_to_f32(f32_to_q31(0.5)) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn param_scale() {
        assert_eq!(param_val_to_f32(0), 0.0);
        assert!((param_val_to_f32(1023) - 1.0).abs() < 1e-6);
        assert!((param_val_to_f32(4000) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn softclip_bounds() {
        let c = 0.05;
        assert!((softclip(c, 1.0) - 0.95).abs() < 1e-6);
        assert!((softclip(c, 3.0) - 0.95).abs() < 1e-6);
        assert!((softclip(c, -3.0) + 0.95).abs() < 1e-6);
        assert_eq!(softclip(c, 0.0), 0.0);
    }

    #[test]
    fn sine_in_turns() {
        assert!(sin_turns(0.0).abs() < 1e-6);
        assert!((sin_turns(0.25) - 1.0).abs() < 1e-6);
        assert!((sin_turns(1.25) - 1.0).abs() < 1e-5);
        assert!((sin_turns(-0.25) + 1.0).abs() < 1e-5);
    }

    #[test]
    fn wrap_unit_range() {
        assert_eq!(wrap_unit(0.0), 0.0);
        assert!((wrap_unit(1.5) - 0.5).abs() < 1e-6);
        assert!((wrap_unit(-0.25) - 0.75).abs() < 1e-6);
        assert!(wrap_unit(-1e-9) < 1.0);
    }
}
