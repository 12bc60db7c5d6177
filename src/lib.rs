//! Foldosc: a real-time-safe folded-wavetable oscillator core.
//!
//! One monophonic voice: phase accumulation, sign-folded wavetable reads,
//! a per-block LFO ramp on the morph selector, and a waveshaping/soft-clip
//! stage producing Q31 output. Nothing in the block path allocates, locks
//! or logs.

pub mod config;
pub mod control;
#[doc(hidden)]
pub mod harness;
#[doc(hidden)]
pub mod invariant_ppt;
pub mod invariant_rt;
pub mod lfo;
pub mod math;
pub mod osc;
pub mod params;
pub mod reader;
pub mod rt;
pub mod states;
pub mod wavetable;

pub use config::{ConfigError, OscConfig};
pub use osc::Oscillator;
pub use params::{ParamId, ParamStore};
pub use reader::FoldWeight;
pub use wavetable::{Wavetable, WavetableError, WavetableProvider};

/// Requested pitch: note index plus a sub-semitone fraction in 1/256 steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pitch {
    pub note: u8,
    pub fine: u8,
}

impl Pitch {
    pub const fn new(note: u8, fine: u8) -> Self {
        Self { note, fine }
    }

    /// Decode the host's packed pitch word (note in the high byte).
    pub const fn from_raw(raw: u16) -> Self {
        Self {
            note: (raw >> 8) as u8,
            fine: (raw & 0xFF) as u8,
        }
    }

    pub const fn to_raw(self) -> u16 {
        ((self.note as u16) << 8) | self.fine as u16
    }
}

/// Ingress particle: per-block inputs supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleParams {
    pub pitch: Pitch,
    /// Shape LFO value in Q31, nominally [-1, 1].
    pub shape_lfo: i32,
}

impl CycleParams {
    pub const fn new(pitch: Pitch, shape_lfo: i32) -> Self {
        Self { pitch, shape_lfo }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_raw_layout() {
        let pitch = Pitch::from_raw(0x4580);
        assert_eq!(pitch.note, 0x45);
        assert_eq!(pitch.fine, 0x80);
        assert_eq!(pitch.to_raw(), 0x4580);
    }
}
